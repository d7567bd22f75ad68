use oswe_core::{CableCatalog, CableSpec, Kilometers, Megawatts, Meters, Severity, Tonnes, Usd};
use oswe_design::{
    load_config_from_path, ElectricalDesign, ElectricalDesignConfig, SubstationDesignConfig,
    SubstructureType,
};
use std::io::Write;
use tempfile::Builder;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn catalog() -> CableCatalog {
    CableCatalog::new()
        .with_cable(
            CableSpec::new("XLPE_500mm_132kV", 50.0, Megawatts(200.0))
                .with_compensation_factor(0.5)
                .with_cost_per_km(650_000.0)
                .with_rated_voltage(132.0),
        )
        .with_cable(
            CableSpec::new("XLPE_1000mm_220kV", 90.0, Megawatts(400.0))
                .with_compensation_factor(1.2)
                .with_cost_per_km(850_000.0)
                .with_rated_voltage(220.0),
        )
}

fn approx(actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn reference_plant_end_to_end() {
    init_tracing();
    let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    design.run().unwrap();

    let export = design.export_cables().unwrap();
    assert_eq!(export.num_cables, 3);
    // 0.03 km riser + 50 km to landfall + 3 km to the interconnection
    assert_eq!(export.length, Kilometers(53.03));
    approx(export.mass.value(), 53.03 * 50.0);
    approx(export.total_length.value(), 3.0 * 53.03);

    let sub = design.substation().unwrap();
    assert_eq!(sub.num_substations, 1);
    assert_eq!(sub.substructure_length, Meters(40.0));
    assert_eq!(sub.shunt_reactor_cost, Usd(0.0));
    assert_eq!(sub.mpt_rating, Megawatts(170.0));
    approx(sub.topside_mass.value(), 2248.5);
    approx(sub.mpt_cost.value(), 5_250_000.0);
    approx(sub.switchgear_cost.value(), 402_000.0);
    approx(sub.topside_cost.value(), 2248.5 * 14_500.0 + 4_500_000.0);
    approx(sub.ancillary_system_cost.value(), 6_000_000.0);
    approx(sub.land_assembly_cost.value(), 480_150.0);
    approx(sub.substation_cost.value(), 49_235_400.0);

    let structure = 0.4 * 2248.5;
    let pile = 8.0 * f64::powf(structure, 0.5574);
    approx(sub.substructure_mass.value(), structure + pile);
    approx(sub.substructure_cost.value(), structure * 3_000.0);
}

#[test]
fn design_result_has_pipeline_layout() {
    let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    design.run().unwrap();

    let value = design.design_result().unwrap().to_value().unwrap();
    assert_eq!(value["num_substations"], 1);

    let topside = &value["offshore_substation_topside"];
    assert_eq!(topside["deck_space"], 1.0);
    assert!(topside["mass"].is_number());
    assert!(topside["unit_cost"].is_number());

    let substructure = &value["offshore_substation_substructure"];
    assert_eq!(substructure["type"], "Monopile");
    assert_eq!(substructure["length"], 40.0);
    assert_eq!(substructure["deck_space"], 1.0);

    let cable = &value["export_system"]["cable"];
    assert_eq!(cable["linear_density"], 50.0);
    assert_eq!(cable["number"], 3);
    assert_eq!(cable["cable_power"], 200.0);
    assert_eq!(cable["sections"].as_array().unwrap().len(), 1);
    assert_eq!(cable["sections"][0], 53.03);
}

#[test]
fn topside_unit_cost_is_full_substation_cost() {
    let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    let result = design.run().unwrap().clone();
    let sub = design.substation().unwrap();
    assert_eq!(result.offshore_substation_topside.unit_cost, sub.substation_cost);
    assert_eq!(result.offshore_substation_substructure.unit_cost, sub.substructure_cost);
    assert_eq!(result.offshore_substation_substructure.kind, SubstructureType::Monopile);
}

#[test]
fn detailed_output_adds_totals() {
    let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    design.run().unwrap();
    let detailed = design.detailed_output().unwrap();
    let export = design.export_cables().unwrap();

    assert_eq!(detailed.num_substations(), 1);
    assert_eq!(detailed.export_system_total_mass, export.total_mass);
    assert_eq!(detailed.export_system_total_length, export.total_length);
    assert_eq!(detailed.export_system_cable_power, Megawatts(200.0));
    assert_eq!(detailed.substation_mpt_rating, Megawatts(170.0));
    approx(
        detailed.export_system_total_cost.value(),
        export.total_length.value() * 650_000.0,
    );
    assert!(detailed.diagnostics.is_empty());

    let value = detailed.to_value().unwrap();
    for key in [
        "num_substations",
        "offshore_substation_topside",
        "offshore_substation_substructure",
        "export_system",
        "export_system_total_mass",
        "export_system_total_length",
        "export_system_total_cost",
        "export_system_cable_power",
        "substation_mpt_rating",
        "substation_topside_mass",
        "substation_topside_cost",
        "substation_substructure_mass",
        "substation_substructure_cost",
        "substation_total_cost",
        "substation_total_substructure_cost",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn running_twice_gives_identical_outputs() {
    let config = ElectricalDesignConfig::new(72.5, 41.0, 1_130.0, "XLPE_1000mm_220kV")
        .with_num_redundant(1)
        .with_touchdown_distance(650.0)
        .with_percent_added_length(0.05);

    let mut first = ElectricalDesign::new(&config, &catalog()).unwrap();
    let mut second = ElectricalDesign::new(&config, &catalog()).unwrap();
    let a = first.run().unwrap().to_value().unwrap();
    let b = second.run().unwrap().to_value().unwrap();
    assert_eq!(a, b);

    let again = first.run().unwrap().to_value().unwrap();
    assert_eq!(a, again);
    assert_eq!(
        first.detailed_output().unwrap(),
        second.detailed_output().unwrap()
    );
}

#[test]
fn omitted_substation_design_uses_defaults() {
    let config = ElectricalDesignConfig::new(50.0, 30.0, 1_000.0, "XLPE_1000mm_220kV");
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    design.run().unwrap();
    let sub = design.substation().unwrap();

    // 1000 MW over 400 MW cables -> 3 cables, 2 substations
    assert_eq!(sub.num_substations, 2);
    assert_eq!(sub.num_mpt, 3);
    // 1000 / 6 = 166.7 MW -> 170 MW
    assert_eq!(sub.mpt_rating, Megawatts(170.0));
    approx(sub.mpt_cost.value(), 3.0 * 1_750_000.0);
    approx(sub.switchgear_cost.value(), 3.0 * 134_000.0);
    approx(sub.ancillary_system_cost.value(), 6_000_000.0);
    approx(
        sub.land_assembly_cost.value(),
        (3.0 * 134_000.0 + 6_000_000.0) * 0.075,
    );
    approx(sub.total_substation_cost().value(), 2.0 * sub.substation_cost.value());

    let detailed = design.detailed_output().unwrap();
    assert_eq!(detailed.substation_total_cost, sub.total_substation_cost());
    approx(
        detailed.substation_total_substructure_cost.value(),
        2.0 * sub.substructure_cost.value(),
    );
}

#[test]
fn capacity_divisible_by_800_has_no_extra_substation() {
    for (capacity, expected) in [(800.0, 1), (1_600.0, 2), (2_400.0, 3)] {
        let config = ElectricalDesignConfig::new(50.0, 30.0, capacity, "XLPE_1000mm_220kV");
        let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
        design.run().unwrap();
        assert_eq!(design.design_result().unwrap().num_substations, expected);
    }
}

#[test]
fn overrides_flow_into_costs() {
    let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV")
        .with_touchdown_distance(100.0)
        .with_substation_design(SubstationDesignConfig {
            mpt_cost_rate: Some(2_000_000.0),
            shunt_cost_rate: Some(100_000.0),
            switchgear_cost: Some(150_000.0),
            topside_assembly_factor: Some(0.1),
            num_substations: Some(2),
            ..Default::default()
        });
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    design.run().unwrap();
    let sub = design.substation().unwrap();

    assert_eq!(sub.num_substations, 2);
    // 500 / (3 * 2) = 83.3 MW -> 80 MW
    assert_eq!(sub.mpt_rating, Megawatts(80.0));
    approx(sub.mpt_cost.value(), 6_000_000.0);
    // 100 m touchdown * 0.5 Mvar/km
    approx(sub.shunt_reactor_cost.value(), 50.0 * 100_000.0);
    approx(sub.switchgear_cost.value(), 450_000.0);
    approx(
        sub.land_assembly_cost.value(),
        (450_000.0 + 5_000_000.0 + 6_000_000.0) * 0.1,
    );
}

#[test]
fn oversized_touchdown_passes_negative_length_through() {
    let config = ElectricalDesignConfig::new(2.0, 10.0, 200.0, "XLPE_500mm_132kV")
        .with_interconnection_distance(0.0)
        .with_touchdown_distance(5_000.0);
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    design.run().unwrap();

    let export = design.export_cables().unwrap();
    // 0.01 + (2 - 5) + 0
    assert_eq!(export.length, Kilometers(-2.99));
    assert_eq!(export.mass, Tonnes(-149.5));

    let diagnostics = &design.detailed_output().unwrap().diagnostics;
    assert_eq!(diagnostics.warning_count(), 2);
    assert!(diagnostics
        .issues
        .iter()
        .all(|issue| issue.severity == Severity::Warning));
}

#[test]
fn zero_capacity_without_redundancy_is_config_error() {
    let config = ElectricalDesignConfig::new(50.0, 30.0, 0.0, "XLPE_500mm_132kV");
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    assert!(design.run().unwrap_err().is_config());
    assert!(design.design_result().unwrap_err().is_sequencing());
}

#[test]
fn huge_capacity_is_config_error_not_panic() {
    let config = ElectricalDesignConfig::new(50.0, 30.0, 1e300, "XLPE_500mm_132kV");
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    let err = design.run().unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("export cables"));
    assert!(design.design_result().unwrap_err().is_sequencing());
    assert!(design.cable_system().sections().is_empty());

    let config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV")
        .with_num_redundant(u32::MAX);
    let mut design = ElectricalDesign::new(&config, &catalog()).unwrap();
    assert!(design.run().unwrap_err().is_config());
}

#[test]
fn missing_depth_is_config_error() {
    let mut config = ElectricalDesignConfig::new(50.0, 30.0, 500.0, "XLPE_500mm_132kV");
    config.site.depth = None;
    let err = ElectricalDesign::new(&config, &catalog()).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("site.depth"));
}

#[test]
fn runs_from_config_and_catalog_files() {
    let mut catalog_file = Builder::new().suffix(".yaml").tempfile().unwrap();
    catalog_file
        .write_all(
            br#"
XLPE_630mm_220kV:
  linear_density: 70.0
  cable_power: 350.0
  compensation_factor: 0.8
  cost_per_km: 750000
  rated_voltage: 220
"#,
        )
        .unwrap();
    let mut config_file = Builder::new().suffix(".json").tempfile().unwrap();
    config_file
        .write_all(
            br#"{
  "site": {"distance_to_landfall": 40, "depth": 25},
  "landfall": {"interconnection_distance": 5},
  "plant": {"capacity": 1000},
  "export_system_design": {"cables": "XLPE_630mm_220kV", "num_redundant": 1},
  "substation_design": {"oss_pile_cost_rate": 2500}
}"#,
        )
        .unwrap();

    let catalog = CableCatalog::load_from_path(catalog_file.path()).unwrap();
    let config = load_config_from_path(config_file.path()).unwrap();
    let mut design = ElectricalDesign::new(&config, &catalog).unwrap();
    let result = design.run().unwrap();

    // ceil(1000 / 350) + 1
    assert_eq!(result.export_system.cable.number, 4);
    assert_eq!(result.num_substations, 2);
    assert_eq!(result.export_system.cable.sections, vec![Kilometers(45.025)]);
    let sub = design.substation().unwrap();
    let pile = sub.substructure_pile_mass.value();
    let structure = sub.substructure_mass.value() - pile;
    assert!(pile > 0.0);
    approx(sub.substructure_cost.value(), structure * 3_000.0 + pile * 2_500.0);
}
