//! Round-trips through JSON and bincode at every level of the stack

use mcdist_bivariate::{BivariateDistribution, ElasticBivariate, SampleMode};
use mcdist_interp::{Interp2D, CUTOFF_COSINE};
use mcdist_univariate::{AnyTabular, CoupledElastic, TabularUnivariate, Tabulated, Uniform};
use rstest::rstest;

fn elastic_pair() -> BivariateDistribution<CoupledElastic> {
    let conditional = |ratio| {
        CoupledElastic::new(
            vec![-1.0, 0.0, CUTOFF_COSINE],
            vec![0.5, 0.5, 0.5],
            1e-6,
            ratio,
        )
        .unwrap()
    };
    BivariateDistribution::new(
        [1.0, 2.0],
        vec![conditional(0.9), conditional(0.95)],
        Interp2D::LIN_LIN_LIN,
        SampleMode::Correlated,
    )
    .unwrap()
}

fn mixed_tabular() -> BivariateDistribution<AnyTabular> {
    BivariateDistribution::new(
        [1.0, 2.0, 3.0],
        vec![
            Uniform::new(0.0, 2.0, 1.0).unwrap().into(),
            Tabulated::new([0.0, 1.0, 2.0], [0.0, 1.0, 1.0]).unwrap().into(),
            Uniform::new(0.0, 4.0, 1.0).unwrap().into(),
        ],
        Interp2D::LIN_LIN_LIN,
        SampleMode::UnitBase,
    )
    .unwrap()
}

/// Every deterministic query must survive the round trip bit for bit
fn assert_same_behavior<D: TabularUnivariate>(
    original: &BivariateDistribution<D>,
    restored: &BivariateDistribution<D>,
    primaries: &[f64],
    secondaries: &[f64],
) {
    assert_eq!(restored.interp(), original.interp());
    assert_eq!(restored.mode(), original.mode());
    assert_eq!(restored.tolerances(), original.tolerances());
    assert_eq!(restored.primary_grid(), original.primary_grid());
    assert_eq!(
        restored.extends_beyond_primary_limits(),
        original.extends_beyond_primary_limits()
    );

    for &primary in primaries {
        for &secondary in secondaries {
            assert_eq!(
                restored.evaluate(primary, secondary).unwrap(),
                original.evaluate(primary, secondary).unwrap()
            );
            assert_eq!(
                restored.conditional_pdf(primary, secondary).unwrap(),
                original.conditional_pdf(primary, secondary).unwrap()
            );
            assert_eq!(
                restored.conditional_cdf(primary, secondary).unwrap(),
                original.conditional_cdf(primary, secondary).unwrap()
            );
        }
        assert_eq!(
            restored.sample_with_random_number(primary, 0.37).unwrap(),
            original.sample_with_random_number(primary, 0.37).unwrap()
        );
    }
}

#[rstest]
fn json_preserves_elastic_conditionals() {
    let original = elastic_pair();
    let text = original.to_json().unwrap();
    let restored = BivariateDistribution::<CoupledElastic>::from_json(&text).unwrap();

    assert_same_behavior(
        &original,
        &restored,
        &[1.0, 1.3, 2.0],
        &[-1.0, -0.3, 0.47, 0.9999995, 1.0],
    );
}

#[rstest]
fn bincode_preserves_mixed_conditionals() {
    let original = mixed_tabular();
    let bytes = bincode::serialize(&original).unwrap();
    let restored: BivariateDistribution<AnyTabular> = bincode::deserialize(&bytes).unwrap();

    assert_same_behavior(
        &original,
        &restored,
        &[1.0, 1.4, 2.0, 2.75, 3.0],
        &[0.0, 0.6, 1.3, 1.9, 3.5],
    );
}

#[rstest]
fn json_and_bincode_agree_on_the_same_engine() {
    let original = mixed_tabular();

    let text = serde_json::to_string(&original).unwrap();
    let from_json: BivariateDistribution<AnyTabular> = serde_json::from_str(&text).unwrap();
    let bytes = bincode::serialize(&original).unwrap();
    let from_bincode: BivariateDistribution<AnyTabular> = bincode::deserialize(&bytes).unwrap();

    assert_same_behavior(&from_json, &from_bincode, &[1.5, 2.5], &[0.5, 1.5, 2.5]);
}

#[rstest]
fn engine_round_trip_keeps_configuration() {
    let conditional = CoupledElastic::new(
        vec![-1.0, 0.0, CUTOFF_COSINE],
        vec![0.5, 0.5, 0.5],
        1e-6,
        0.9,
    )
    .unwrap();
    let mut original = ElasticBivariate::with_tolerances(
        vec![1.0, 2.0],
        vec![conditional.clone(), conditional],
        Interp2D::LIN_LIN_LIN,
        SampleMode::UnitBase,
        1e-9,
        1e-12,
    )
    .unwrap();
    original.extend_beyond_primary_limits();

    let text = serde_json::to_string(&original).unwrap();
    let restored: ElasticBivariate = serde_json::from_str(&text).unwrap();

    assert_eq!(restored.cutoff_cosine(), original.cutoff_cosine());
    assert_eq!(restored.tolerances(), original.tolerances());
    assert!(restored.extends_beyond_primary_limits());

    // extension survives, so queries outside the grid still resolve
    assert_eq!(
        restored.sample_with_random_number(0.5, 0.0).unwrap(),
        original.sample_with_random_number(0.5, 0.0).unwrap()
    );
    assert_eq!(restored.evaluate(2.5, 0.3).unwrap(), 0.5);
}
