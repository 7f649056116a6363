#![cfg(test)]

// Property tests for OrderedMap kept inside the crate so they can reach the
// raw `keys`/`values` vectors when checking structural invariants.

use crate::error::IndexError;
use crate::ordered_map::OrderedMap;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Del(usize),
    Get(usize),
    Has(String),
    At(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let has_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            idx.clone().prop_map(OpI::Del),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![has_pool.prop_map(|s: String| s), "[a-z]{0,5}".prop_map(|s| s)]
                .prop_map(OpI::Has),
            (0usize..10).prop_map(OpI::At),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn model_pos(model: &[(String, i32)], k: &str) -> Option<usize> {
    model.iter().position(|(mk, _)| mk == k)
}

fn assert_structure(sut: &OrderedMap<String, i32>) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.keys.len(), sut.values.len());
    for (i, k) in sut.keys.iter().enumerate() {
        prop_assert!(!sut.keys[..i].contains(k), "duplicate key {:?}", k);
    }
    Ok(())
}

// Property: State-machine equivalence against an association-list model.
// Invariants exercised across random operation sequences:
// - `set` overwrites in place on a present key and appends otherwise.
// - `del` removes one entry and keeps the relative order of the rest.
// - `get`/`has`/`index` parity with the model, including misses.
// - `at` answers by position and reports `OutOfRange` past the end.
// - `keys.len() == values.len()` and key uniqueness after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: OrderedMap<String, i32> = OrderedMap::new();
        let mut model: Vec<(String, i32)> = Vec::new();

        for op in ops {
            match op {
                OpI::Set(i, v) => {
                    let k = pool[i].clone();
                    match model_pos(&model, &k) {
                        Some(p) => model[p].1 = v,
                        None => model.push((k.clone(), v)),
                    }
                    sut.set(k, v);
                }
                OpI::Del(i) => {
                    let k = &pool[i];
                    if let Some(p) = model_pos(&model, k) {
                        model.remove(p);
                    }
                    sut.del(k.as_str());
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    let expected = model_pos(&model, k).map(|p| &model[p].1);
                    prop_assert_eq!(sut.get(k.as_str()), expected);
                    prop_assert_eq!(sut.index(k.as_str()), model_pos(&model, k));
                }
                OpI::Has(s) => {
                    prop_assert_eq!(sut.has(s.as_str()), model_pos(&model, &s).is_some());
                }
                OpI::At(p) => {
                    match model.get(p) {
                        Some((mk, mv)) => {
                            prop_assert_eq!(sut.at(p), Ok(mv));
                            prop_assert_eq!(sut.key(p), Ok(mk));
                        }
                        None => {
                            let err = IndexError::OutOfRange { index: p, len: model.len() };
                            prop_assert_eq!(sut.at(p), Err(err));
                        }
                    }
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(p) = model_pos(&model, k) {
                        let v = sut.get_mut(k.as_str()).expect("present key resolves");
                        *v = v.saturating_add(d);
                        model[p].1 = model[p].1.saturating_add(d);
                    } else {
                        prop_assert!(sut.get_mut(k.as_str()).is_none());
                    }
                }
                OpI::Iterate => {
                    let seen: Vec<(String, i32)> =
                        sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(&seen, &model);
                }
            }

            // Post-conditions after each op
            assert_structure(&sut)?;
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            match model.first() {
                Some((_, v)) => prop_assert_eq!(sut.first(), Ok(v)),
                None => prop_assert_eq!(sut.first(), Err(IndexError::Empty)),
            }
        }
    }
}

// Property: Slicing matches `Vec` slicing after clamping signed bounds, and
// both halves of the pair are cut over the same positions.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_range_matches_clamped_slice(
        n in 0usize..12,
        start in -15isize..15,
        end in -15isize..15,
    ) {
        let sut: OrderedMap<usize, usize> = (0..n).map(|i| (i, i * 100)).collect();
        let clamp = |b: isize| -> usize {
            if b < 0 { n.saturating_sub(b.unsigned_abs()) } else { (b as usize).min(n) }
        };
        let (s, e) = (clamp(start), clamp(end));
        let expected: Vec<usize> = if s < e { (s..e).collect() } else { Vec::new() };

        let r = sut.range(start, end);
        assert_structure_usize(&r)?;
        prop_assert_eq!(r.keys(), expected.clone());
        prop_assert_eq!(r.values(), expected.iter().map(|i| i * 100).collect::<Vec<_>>());

        let rest = sut.rest(start);
        prop_assert_eq!(rest.keys(), (s..n).collect::<Vec<_>>());
    }
}

fn assert_structure_usize(m: &OrderedMap<usize, usize>) -> Result<(), TestCaseError> {
    prop_assert_eq!(m.keys.len(), m.values.len());
    Ok(())
}

// Property: `sort` is a stable permutation of the source entries.
proptest! {
    #[test]
    fn prop_sort_is_stable_permutation(vals in proptest::collection::vec(0u8..4, 0..20)) {
        let sut: OrderedMap<usize, u8> = vals.iter().copied().enumerate().collect();
        let sorted = sut.sort(|a, b| a.1.cmp(b.1));

        let mut expected: Vec<(usize, u8)> = vals.iter().copied().enumerate().collect();
        expected.sort_by_key(|&(_, v)| v);
        let got: Vec<(usize, u8)> = sorted.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(sut.len(), vals.len());
    }
}
