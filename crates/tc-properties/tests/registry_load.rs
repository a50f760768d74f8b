//! Loading a coefficient database into a registry and querying it.

use tc_core::ChemicalId;
use tc_properties::{
    Database, EngineConfig, PropertyError, PropertyKind, RecordSection, Registry, Spacing, SweepDefinition,
    ValidationError,
};

const WATER: &str = "7732-18-5";
const ETHANOL: &str = "64-17-5";

const DATABASE: &str = r#"
compounds:
  - id: 7732-18-5
    name: water
    molar_mass: 0.01801528
  - id: 64-17-5
    name: ethanol
    molar_mass: 0.04606844
  - id: 67-56-1
    name: methanol
    molar_mass: -1.0

correlations:
  # 0
  - compound: 7732-18-5
    property: vapor_pressure
    method: DIPPR_101
    equation: dippr101
    coefficients: [73.649, -7258.2, -7.3037, 4.1653e-6, 2]
    valid_range: [273.16, 647.1]
    priority: 1
    source: DIPPR 801
  # 1
  - compound: 7732-18-5
    property: vapor_pressure
    method: ANTOINE_POLING
    equation: antoine
    coefficients: [10.19621302, 1730.63, -39.724]
    valid_range: [280.0, 440.0]
    priority: 0
  # 2
  - compound: 7732-18-5
    property: heat_of_vaporization
    method: WATSON
    equation: watson
    coefficients: [43908.0, 300.0, 647.14]
    valid_range: [273.16, 640.0]
    priority: 0
  # 3: Antoine does not describe a heat of vaporization
  - compound: 7732-18-5
    property: heat_of_vaporization
    method: BAD_FORM
    equation: antoine
    coefficients: [10.2, 1730.6, -39.7]
    valid_range: [280.0, 440.0]
  # 4: wrong arity
  - compound: 7732-18-5
    property: heat_of_vaporization
    method: SHORT
    equation: watson
    coefficients: [43908.0, 300.0]
    valid_range: [273.16, 640.0]
  # 5: range reversed
  - compound: 7732-18-5
    property: liquid_density
    method: REVERSED
    equation: dippr105
    coefficients: [5.459, 0.30542, 647.13, 0.081]
    valid_range: [640.0, 273.16]
  # 6
  - compound: 7732-18-5
    property: liquid_density
    method: DIPPR_105
    equation: dippr105
    coefficients: [5.459, 0.30542, 647.13, 0.081]
    valid_range: [273.16, 640.0]
  # 7
  - compound: 7732-18-5
    property: saturation_temperature
    method: ANTOINE_POLING
    equation: antoine_inverse
    coefficients: [10.19621302, 1730.63, -39.724]
    valid_range: [1000.0, 1000000.0]
  # 8
  - compound: 7732-18-5
    property: dipole_moment
    method: CRC
    equation: constant
    coefficients: [1.85]
  # 9: empty compound id
  - compound: " "
    property: dipole_moment
    method: CRC
    equation: constant
    coefficients: [1.0]
  # 10: range reaches past the critical temperature
  - compound: 64-17-5
    property: heat_of_vaporization
    method: PITZER
    equation: pitzer
    coefficients: [514.0, 0.635]
    valid_range: [300.0, 600.0]
  # 11
  - compound: 64-17-5
    property: heat_of_vaporization
    method: VELASCO
    equation: velasco
    coefficients: [514.0, 0.635]
    valid_range: [250.0, 500.0]
    extrapolation: constant
"#;

fn id(s: &str) -> ChemicalId {
    ChemicalId::new(s).unwrap()
}

fn registry() -> (Registry, tc_properties::LoadReport) {
    let db = Database::from_yaml_str(DATABASE).unwrap();
    Registry::bootstrap(db, EngineConfig::default()).unwrap()
}

#[test]
fn bad_records_are_isolated() {
    let (registry, report) = registry();

    let skipped: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.section, s.index))
        .collect();
    assert_eq!(
        skipped,
        vec![
            (RecordSection::Compounds, 2),
            (RecordSection::Correlations, 3),
            (RecordSection::Correlations, 4),
            (RecordSection::Correlations, 5),
            (RecordSection::Correlations, 9),
            (RecordSection::Correlations, 10),
        ]
    );
    assert!(matches!(report.skipped[0].error, ValidationError::InvalidMolarMass { .. }));
    assert!(matches!(report.skipped[1].error, ValidationError::EquationNotAllowed { .. }));
    assert!(matches!(report.skipped[2].error, ValidationError::Correlation { .. }));
    assert!(matches!(report.skipped[4].error, ValidationError::InvalidIdentifier { .. }));
    assert_eq!(report.compounds_loaded, 2);
    assert_eq!(report.correlations_loaded, 7);

    // Everything else is usable.
    let water = id(WATER);
    let rho = registry
        .get_property(&water, PropertyKind::LiquidDensity, 300.0, None)
        .unwrap();
    assert!((rho - 55.2046).abs() < 1e-3, "{rho}");
    assert_eq!(
        registry.available_methods(&water, PropertyKind::HeatOfVaporization).unwrap(),
        vec![tc_core::MethodId::new("WATSON").unwrap()]
    );
}

#[test]
fn priority_picks_antoine_inside_its_range() {
    let (registry, _) = registry();
    let water = id(WATER);
    let conditions = tc_properties::Conditions::at_temperature(373.15);

    let e = registry
        .evaluate_property(&water, PropertyKind::VaporPressure, &conditions)
        .unwrap();
    assert_eq!(e.method.as_str(), "ANTOINE_POLING");
    assert!((e.value - 101_336.5).abs() < 1.0, "{}", e.value);

    // Above Antoine's range the DIPPR form takes over.
    let e = registry
        .evaluate_property(&water, PropertyKind::VaporPressure, &tc_properties::Conditions::at_temperature(500.0))
        .unwrap();
    assert_eq!(e.method.as_str(), "DIPPR_101");
}

#[test]
fn set_and_clear_method() {
    let (mut registry, _) = registry();
    let water = id(WATER);

    registry
        .set_method(&water, PropertyKind::VaporPressure, "DIPPR_101")
        .unwrap();
    let p = registry
        .get_property(&water, PropertyKind::VaporPressure, 373.15, None)
        .unwrap();
    assert!((p - 101_260.56).abs() < 1.0, "{p}");

    registry.clear_method(&water, PropertyKind::VaporPressure).unwrap();
    let p = registry
        .get_property(&water, PropertyKind::VaporPressure, 373.15, None)
        .unwrap();
    assert!((p - 101_336.5).abs() < 1.0, "{p}");

    assert!(matches!(
        registry.set_method(&water, PropertyKind::VaporPressure, "NOPE"),
        Err(PropertyError::UnknownMethod { .. })
    ));
}

#[test]
fn saturation_temperature_is_a_function_of_pressure() {
    let (registry, _) = registry();
    let water = id(WATER);

    let t = registry
        .get_property(&water, PropertyKind::SaturationTemperature, 0.0, Some(101_325.0))
        .unwrap();
    assert!((t - 373.15).abs() < 0.1, "{t}");

    assert!(matches!(
        registry.get_property(&water, PropertyKind::SaturationTemperature, 300.0, None),
        Err(PropertyError::MissingCondition { .. })
    ));
}

#[test]
fn temperature_properties_ignore_pressure() {
    let (registry, _) = registry();
    let water = id(WATER);
    let without = registry
        .get_property(&water, PropertyKind::HeatOfVaporization, 320.0, None)
        .unwrap();
    let with = registry
        .get_property(&water, PropertyKind::HeatOfVaporization, 320.0, Some(5.0e6))
        .unwrap();
    assert_eq!(without, with);
    assert!((without - 42_928.990094915454).abs() < 1e-6);
}

#[test]
fn record_policy_applies_outside_range() {
    let (registry, _) = registry();
    let ethanol = id(ETHANOL);
    let at_edge = registry
        .get_property(&ethanol, PropertyKind::HeatOfVaporization, 500.0, None)
        .unwrap();
    let beyond = registry
        .get_property(&ethanol, PropertyKind::HeatOfVaporization, 510.0, None)
        .unwrap();
    assert_eq!(at_edge, beyond);
}

#[test]
fn errors_name_what_was_missing() {
    let (registry, _) = registry();
    assert!(matches!(
        registry.get_property(&id("67-56-1"), PropertyKind::VaporPressure, 300.0, None),
        Err(PropertyError::UnknownCompound { .. })
    ));
    assert!(matches!(
        registry.get_property(&id(ETHANOL), PropertyKind::VaporPressure, 300.0, None),
        Err(PropertyError::UnknownProperty { .. })
    ));

    let err = registry
        .get_property(&id(WATER), PropertyKind::LiquidDensity, 700.0, None)
        .unwrap_err();
    let msg = err.to_string();
    assert!(matches!(err, PropertyError::NoApplicableMethod { .. }));
    assert!(msg.contains(WATER) && msg.contains("liquid_density") && msg.contains("700"), "{msg}");
}

#[test]
fn bulk_queries_use_configured_backend() {
    let db = Database::from_yaml_str(DATABASE).unwrap();
    let config = EngineConfig::from_yaml_str("evaluator: parallel\nparallel_min_len: 8").unwrap();
    let (parallel, _) = Registry::bootstrap(db, config).unwrap();
    let (serial, _) = registry();
    assert_eq!(parallel.evaluator().name(), "parallel");

    let water = id(WATER);
    let xs: Vec<f64> = (0..500).map(|i| 250.0 + i as f64).collect();
    let a = serial.get_property_many(&water, PropertyKind::VaporPressure, &xs).unwrap();
    let b = parallel.get_property_many(&water, PropertyKind::VaporPressure, &xs).unwrap();
    for (x, (a, b)) in xs.iter().zip(a.iter().zip(&b)) {
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a.to_bits(), b.to_bits(), "T = {x}"),
            (Err(_), Err(_)) => assert!(*x < 273.16 || *x > 647.1),
            _ => panic!("backends disagree at T = {x}"),
        }
    }
}

#[test]
fn registry_sweep() {
    let (registry, _) = registry();
    let sweep = SweepDefinition::new(1.0e3, 1.0e6, 25, Spacing::Logarithmic).unwrap();
    let result = registry
        .sweep(&id(WATER), PropertyKind::SaturationTemperature, &sweep)
        .unwrap();
    assert_eq!(result.num_failed, 0);
    let temps: Vec<f64> = result.values.iter().flatten().copied().collect();
    assert!(temps.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn json_database_loads_from_disk() {
    let dir = std::env::temp_dir().join("tc_properties_registry_load");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let db = Database::from_yaml_str(DATABASE).unwrap();
    let path = dir.join("db.json");
    db.save(&path).unwrap();

    let (from_disk, report) = Registry::load(&path, EngineConfig::default()).unwrap();
    assert_eq!(report.skipped.len(), 6);
    let (in_memory, _) = registry();
    let water = id(WATER);
    assert_eq!(
        from_disk.get_property(&water, PropertyKind::VaporPressure, 350.0, None).unwrap(),
        in_memory.get_property(&water, PropertyKind::VaporPressure, 350.0, None).unwrap()
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unknown_names_skip_only_their_record() {
    let yaml = r#"
correlations:
  - { compound: 7732-18-5, property: dipole_moment, method: CRC, equation: constant, coefficients: [1.85] }
  - { compound: 7732-18-5, property: dipole_moment, method: KAY, equation: kay_rule, coefficients: [1.0] }
  - { compound: 7732-18-5, property: boiling_color, method: CRC, equation: constant, coefficients: [1.0] }
  - { compound: 7732-18-5, property: dipole_moment, method: CUBIC, equation: constant, coefficients: [1.9], extrapolation: cubic }
"#;
    let db = Database::from_yaml_str(yaml).unwrap();
    let (registry, report) = Registry::bootstrap(db, EngineConfig::default()).unwrap();

    assert_eq!(report.correlations_loaded, 1);
    let errors: Vec<_> = report.skipped.iter().map(|s| (s.index, &s.error)).collect();
    assert!(matches!(
        errors[0],
        (1, ValidationError::UnknownEquation { equation, .. }) if equation == "kay_rule"
    ));
    assert!(matches!(
        errors[1],
        (2, ValidationError::UnknownProperty { property, .. }) if property == "boiling_color"
    ));
    assert!(matches!(
        errors[2],
        (3, ValidationError::UnknownExtrapolation { policy, .. }) if policy == "cubic"
    ));
    assert_eq!(
        registry
            .get_property(&id(WATER), PropertyKind::DipoleMoment, 300.0, None)
            .unwrap(),
        1.85
    );
}

#[test]
fn slope_at_critical_point_is_never_returned() {
    let yaml = r#"
correlations:
  - compound: 7732-18-5
    property: heat_of_vaporization
    method: WATSON
    equation: watson
    coefficients: [43908.0, 300.0, 647.14]
    valid_range: [273.16, 647.14]
    extrapolation: linear
  - compound: 64-17-5
    property: heat_of_vaporization
    method: PITZER
    equation: pitzer
    coefficients: [647.14, 0.344]
    valid_range: [273.16, 647.14]
    extrapolation: linear
"#;
    let db = Database::from_yaml_str(yaml).unwrap();
    let (registry, report) = Registry::bootstrap(db, EngineConfig::default()).unwrap();
    assert!(report.is_clean(), "{:?}", report.skipped);

    for compound in [WATER, ETHANOL] {
        let compound = id(compound);
        let err = registry
            .get_property(&compound, PropertyKind::HeatOfVaporization, 700.0, None)
            .unwrap_err();
        assert!(matches!(err, PropertyError::NonFinite { .. }), "{err}");

        let model = registry.property(&compound, PropertyKind::HeatOfVaporization).unwrap();
        assert!(matches!(
            model.derivative_at(647.14, 1),
            Err(PropertyError::NonFinite { .. })
        ));
        // The value itself is finite at Tc.
        assert!(model.value_at(647.14).unwrap().is_finite());
    }
}
