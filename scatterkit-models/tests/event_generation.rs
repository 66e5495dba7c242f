//! End-to-end collision sampling: configuration, kinematics, parallelism.

use approx::assert_relative_eq;
use scatterkit_core::Error;
use scatterkit_models::{
    generate_events, linspace, CalcType, SamplingConfig, ScatterConfig, ScatterModel, Species,
};
use std::f64::consts::{FRAC_PI_2, PI};
use std::io::Write;

fn fast_sampling() -> SamplingConfig {
    SamplingConfig::new()
        .with_energy_bins(1000)
        .with_angle_bins(120)
}

#[test]
fn test_sampled_events_conserve_energy() {
    for species in Species::ALL {
        for energy in [100.0, 500.0] {
            let mut model = ScatterModel::with_seed(CalcType::Rudd1991, species, 300.0, 1)
                .with_sampling(fast_sampling())
                .unwrap()
                .at_energy(energy)
                .unwrap();
            let binding = species.params().binding_energy;
            let (lo, hi) = model.energy_transfer_domain().unwrap();

            for _ in 0..300 {
                let event = model
                    .sample_event()
                    .unwrap_or_else(|e| panic!("{species} at {energy} eV: {e}"));
                assert!(event.energy_transfer >= lo && event.energy_transfer <= hi);
                assert!((0.0..=FRAC_PI_2).contains(&event.emission_angle));
                assert!((0.0..=PI).contains(&event.primary_angle));
                assert!(event.primary_energy > 0.0);
                assert_relative_eq!(
                    event.primary_energy + event.energy_transfer + binding,
                    energy,
                    max_relative = 1e-12
                );

                let e1 = event.primary_energy;
                let cos_theta =
                    (energy + e1 - event.energy_transfer) / (2.0 * (energy * e1).sqrt());
                assert_relative_eq!(event.primary_angle.cos(), cos_theta, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_config_file_to_events() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "model": {{ "calc_type": "Rudd1991", "species": "He", "temperature": 300.0 }},
            "sampling": {{ "energy_bins": 800, "angle_bins": 100, "seed": 5 }}
        }}"#
    )
    .unwrap();

    let config = ScatterConfig::from_file(file.path()).unwrap();
    let mut a = config.build(250.0).unwrap();
    let mut b = config.build(250.0).unwrap();
    assert_eq!(a.species(), Species::He);
    assert_relative_eq!(a.temperature(), 300.0);
    for _ in 0..10 {
        assert_eq!(a.sample_event(), b.sample_event());
    }
}

#[test]
fn test_kim_events_need_angular_model() {
    let config = ScatterConfig::new(CalcType::Kim1994, Species::H).with_sampling(fast_sampling());
    let mut model = config.build(200.0).unwrap();
    assert!(model.sample_energy_transfer().is_ok());
    assert!(matches!(
        model.sample_event(),
        Err(Error::UnsupportedModel { .. })
    ));
}

#[test]
fn test_generate_events_independent_of_thread_count() {
    let config = ScatterConfig::new(CalcType::Rudd1991, Species::H).with_sampling(fast_sampling());
    let energies = linspace(80.0, 2000.0, 64);

    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| generate_events(&config, &energies, 1234, 5))
    };
    let serial = run(1);
    let parallel = run(4);
    assert_eq!(serial.len(), energies.len());
    assert_eq!(serial, parallel);
}

#[test]
fn test_energy_updates_between_collisions() {
    let mut model = ScatterModel::with_seed(CalcType::Rudd1991, Species::H, 0.0, 8)
        .with_sampling(fast_sampling())
        .unwrap()
        .at_energy(1000.0)
        .unwrap();

    // Follow the primary down in energy until it falls below threshold.
    let mut collisions = 0;
    loop {
        let Ok(event) = model.sample_event() else {
            break;
        };
        collisions += 1;
        if model.set_incident_energy(event.primary_energy).is_err() {
            break;
        }
        assert_relative_eq!(model.incident_energy(), event.primary_energy);
    }
    assert!(collisions >= 1);
}
