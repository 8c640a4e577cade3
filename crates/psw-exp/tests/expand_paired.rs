use psw_core::value::ParamValue;
use psw_exp::{expand, Axis, ExpansionPolicy, SweepSpec};

#[test]
fn one_to_one_pairs_indexwise() {
    let spec = SweepSpec::new([
        Axis::new("a", [1i64, 2, 3].map(ParamValue::from)),
        Axis::new("b", [10i64, 20, 30].map(ParamValue::from)),
    ]);
    let records = expand(&spec, &ExpansionPolicy::OneToOne).expect("expand");
    assert_eq!(records.len(), 3);

    for (record, (a, b)) in records.iter().zip([(1i64, 10i64), (2, 20), (3, 30)]) {
        assert_eq!(record.values["a"], ParamValue::from(a));
        assert_eq!(record.values["b"], ParamValue::from(b));
    }
}

#[test]
fn one_to_one_single_axis() {
    let spec = SweepSpec::new([Axis::new("only", [1i64, 2].map(ParamValue::from))]);
    let records = expand(&spec, &ExpansionPolicy::OneToOne).expect("expand");
    assert_eq!(records.len(), 2);
}

#[test]
fn mismatched_lengths_are_rejected() {
    let spec = SweepSpec::new([
        Axis::new("a", [1i64, 2, 3].map(ParamValue::from)),
        Axis::new("b", [10i64, 20].map(ParamValue::from)),
    ]);
    let err = expand(&spec, &ExpansionPolicy::OneToOne).expect_err("must fail");
    assert_eq!(err.info().code, "sweep-axis-length-mismatch");
    assert_eq!(err.info().context["axis"], "b");
    assert_eq!(err.info().context["expected"], "3");
    assert_eq!(err.info().context["actual"], "2");
}
