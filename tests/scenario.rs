use std::thread;
use tunnelspace::{
    calculate,
    timedep::IntegrationMethod,
    TightBinding,
    TunnelingParameters,
};

#[test]
fn default_scenario() {
    let params = TunnelingParameters::default();
    let res = calculate(&params).unwrap();
    assert!(res.classical_forbidden);
    for p in [res.transmission, res.reflection, res.barrier_occupancy] {
        assert!((0.0..=1.0).contains(&p), "{}", p);
    }
    let sum = res.transmission + res.reflection + res.barrier_occupancy;
    assert!((sum - 1.0).abs() < 1e-6);
    assert!(res.wkb_transmission > 0.0 && res.wkb_transmission < 1.0);
    assert!(res.validation.is_valid, "{:?}", res.validation);
    assert!(res.validation.errors.is_empty());
    assert!((res.conservation.total_probability - 1.0).abs() < 1e-2);
    assert!(res.probability_density.iter().all(|p| p.is_finite()));
    // packet has started moving toward the barrier
    assert!(res.conservation.position_expectation > -5.0);
}

#[test]
fn concurrent_runs_agree() {
    let params = TunnelingParameters {
        time: 0.25,
        method: IntegrationMethod::Euler,
        ..Default::default()
    };
    let reference = calculate(&params).unwrap();
    thread::scope(|s| {
        let handles: Vec<_>
            = (0..4)
            .map(|_| s.spawn(|| calculate(&params).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}

#[test]
fn graphene_dirac_point() {
    let tb = TightBinding::default();
    let check = tb.validate_dirac_point();
    assert!(check.is_valid);
    assert!(check.gap_at_k < 1e-8);

    let dos = tb.calculate_dos((-3.5, 3.5), 140, 80).unwrap();
    assert_eq!(dos.energies.len(), 140);
    assert!(dos.dos.iter().all(|d| d.is_finite() && *d >= 0.0));
}
