use criterion::{Criterion, black_box, criterion_group, criterion_main};
use parest::config::EstimatorOptions;
use parest::core::Parameter;
use parest::discretization::Discretization;
use parest::estimator::{BochnerNorm, DetailedAgainstWeak, Estimator, ReducedAgainstWeak};
use parest::fem::{Swipdg, ThermalBlockProblem};
use parest::reductor::{GRAM_SCHMIDT_ATOL, GRAM_SCHMIDT_RTOL, Reductor, gram_schmidt};

fn bench_estimators(c: &mut Criterion) {
    let t_end = 1.0;
    let swipdg = Swipdg::new(ThermalBlockProblem::thermal_block(4, 1.0), 64, 20.0).unwrap();
    let disc = swipdg.instationary(t_end, 20, vec![0.0; swipdg.dim()]).unwrap();
    let options = EstimatorOptions::new(t_end, Parameter::new(vec![0.1; 4]), Parameter::new(vec![1.0; 4]));
    let mu = Parameter::new(vec![0.2, 0.9, 0.5, 0.3]);
    let u = disc.solve(&mu).unwrap();

    let weak = DetailedAgainstWeak::new(
        swipdg.clone(),
        BochnerNorm::new(Box::new(swipdg.energy_product().clone()), t_end).unwrap(),
        Box::new(swipdg.l2_product().clone()),
        options.clone(),
    )
    .unwrap();

    c.bench_function("detailed against weak", |ben| {
        ben.iter(|| {
            let _eta = weak.estimate(black_box(&u), black_box(&mu), &disc).unwrap();
        })
    });

    let snapshots: Vec<Vec<f64>> = [vec![1.0, 0.1, 1.0, 0.1], vec![0.1, 1.0, 0.1, 1.0]]
        .into_iter()
        .flat_map(|values| disc.solve(&Parameter::new(values)).unwrap().into_inner())
        .collect();
    let basis = gram_schmidt(&snapshots, swipdg.l2_product(), GRAM_SCHMIDT_ATOL, GRAM_SCHMIDT_RTOL).unwrap();
    let reductor = Reductor::new(disc.clone(), basis).unwrap();
    let reduced = reductor.reduce().unwrap();
    let u_red = reduced.solve(&mu).unwrap();
    let estimator = ReducedAgainstWeak::new(
        reductor,
        swipdg.clone(),
        BochnerNorm::new(Box::new(swipdg.energy_product().clone()), t_end).unwrap(),
        Box::new(swipdg.l2_product().clone()),
        options,
    )
    .unwrap();

    c.bench_function("reduced against weak", |ben| {
        ben.iter(|| {
            let _eta = estimator.estimate(black_box(&u_red), black_box(&mu), &reduced).unwrap();
        })
    });
}

criterion_group!(benches, bench_estimators);
criterion_main!(benches);
