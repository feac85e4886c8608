//! Unit tests for the metric abstraction.

use rstest::rstest;

use super::{DistanceMetric, Metric};

#[rstest]
#[case::euclidean("euclidean", Metric::Euclidean)]
#[case::l2_alias("L2", Metric::Euclidean)]
#[case::squared("squared-euclidean", Metric::SquaredEuclidean)]
#[case::cosine(" cosine ", Metric::Cosine)]
#[case::angular("Angular", Metric::Angular)]
fn parses_metric_names(#[case] raw: &str, #[case] expected: Metric) {
    assert_eq!(raw.parse::<Metric>().expect("known metric"), expected);
}

#[test]
fn rejects_unknown_metric() {
    let err = "manhattan".parse::<Metric>().expect_err("unknown metric");
    assert_eq!(err.0, "manhattan");
}

#[rstest]
#[case(Metric::Euclidean)]
#[case(Metric::SquaredEuclidean)]
#[case(Metric::Cosine)]
#[case(Metric::Angular)]
fn metrics_are_symmetric_and_non_negative(#[case] metric: Metric) {
    let a = [0.3_f32, -1.2, 4.0];
    let b = [2.0_f32, 0.5, -0.7];
    let ab = metric.distance(&a, &b).expect("distance");
    let ba = metric.distance(&b, &a).expect("distance");
    assert!(ab >= 0.0);
    assert!((ab - ba).abs() < 1e-12);
}

#[test]
fn references_forward_to_the_metric() {
    let metric = Metric::Cosine;
    let by_ref: &dyn DistanceMetric = &metric;
    assert_eq!(DistanceMetric::name(&by_ref), "cosine");
    let direct = metric.distance(&[1.0, 0.0], &[1.0, 1.0]).expect("distance");
    let forwarded = (&by_ref).distance(&[1.0, 0.0], &[1.0, 1.0]).expect("distance");
    assert_eq!(direct, forwarded);
}
