use std::collections::BTreeSet;

use proptest::prelude::*;
use psw_core::rng::RngHandle;
use psw_core::value::ParamValue;
use psw_exp::{expand, Axis, ExpansionPolicy, IdAllocator, SweepSpec};

fn arb_axes() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(any::<i64>(), 1..4), 1..4)
}

fn spec_from(axes: &[Vec<i64>]) -> SweepSpec {
    SweepSpec::new(axes.iter().enumerate().map(|(idx, values)| {
        Axis::new(
            format!("axis_{idx}"),
            values.iter().map(|v| ParamValue::from(*v)),
        )
    }))
}

proptest! {
    #[test]
    fn cross_product_cardinality_is_product(axes in arb_axes()) {
        let spec = spec_from(&axes);
        let records = expand(&spec, &ExpansionPolicy::AllPermutations).expect("expand");
        let product: usize = axes.iter().map(Vec::len).product();
        prop_assert_eq!(records.len(), product);
    }

    #[test]
    fn one_to_one_cardinality_is_common_length(values in prop::collection::vec(any::<i64>(), 1..8), axes in 1usize..4) {
        let columns: Vec<Vec<i64>> = (0..axes).map(|_| values.clone()).collect();
        let spec = spec_from(&columns);
        let records = expand(&spec, &ExpansionPolicy::OneToOne).expect("expand");
        prop_assert_eq!(records.len(), values.len());
    }

    #[test]
    fn allocated_identifiers_are_unique(n in 0usize..256, seed in any::<u64>()) {
        let mut alloc = IdAllocator::new(RngHandle::from_seed(seed));
        let ids = alloc.allocate(n).expect("allocate");
        prop_assert_eq!(ids.len(), n);
        let unique: BTreeSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), n);
    }
}
