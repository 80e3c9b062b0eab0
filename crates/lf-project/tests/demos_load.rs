use std::path::Path;

#[test]
fn demos_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    for name in ["transfer_line.yaml", "prv_station.json"] {
        let path = root.join(name);
        let project =
            lf_project::load(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        let chain = lf_project::build_chain(&project)
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", name, e));
        assert_eq!(chain.len(), project.elements.len());
    }
}

#[test]
fn transfer_line_inherits_reduced_bore() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/transfer_line.yaml");
    let project = lf_project::load_yaml(&path).unwrap();
    let chain = lf_project::build_chain(&project).unwrap();
    // valve after the reducer takes the reducer outlet bore
    assert_eq!(chain[5].spec.inlet_diameter_mm(), Some(41.9));
    assert_eq!(chain[5].name, "Isolation valve");
    assert_eq!(project.simulation.events.len(), 1);
}
