use std::collections::BTreeMap;

/// Result of comparing one value per picture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict<V> {
    Agree(V),
    /// `majority` is `None` when no class wins the tie-break; every picture is then suspect.
    Disagree {
        majority: Option<(V, Vec<usize>)>,
        suspects: Vec<usize>,
    },
}

/// Majority vote over `values` (aligned with pictures).
///
/// The largest class wins if it is strictly larger than every other. Among tied
/// largest classes, the one whose members have the larger summed agreement
/// history wins. Otherwise there is no majority.
pub fn reconcile<V: Clone + Ord>(values: &[V], agreements: &[usize]) -> Verdict<V> {
    let mut classes: BTreeMap<&V, Vec<usize>> = BTreeMap::new();
    for (i, v) in values.iter().enumerate() {
        classes.entry(v).or_default().push(i);
    }
    if classes.len() == 1 {
        if let Some(v) = classes.keys().next() {
            return Verdict::Agree((*v).clone());
        }
    }
    let top = classes.values().map(Vec::len).max().unwrap_or(0);
    let tied: Vec<(&V, &Vec<usize>)> = classes
        .iter()
        .filter(|(_, members)| members.len() == top)
        .map(|(v, members)| (*v, members))
        .collect();
    let history: Vec<usize> = tied
        .iter()
        .map(|(_, members)| {
            members
                .iter()
                .map(|&i| agreements.get(i).copied().unwrap_or(0))
                .sum()
        })
        .collect();
    let winner = if tied.len() == 1 {
        tied.first().copied()
    } else {
        let best = history.iter().copied().max().unwrap_or(0);
        let leaders: Vec<usize> = (0..tied.len()).filter(|&k| history[k] == best).collect();
        match leaders.as_slice() {
            [k] => Some(tied[*k]),
            _ => None,
        }
    };
    match winner {
        Some((v, members)) => Verdict::Disagree {
            suspects: (0..values.len()).filter(|i| !members.contains(i)).collect(),
            majority: Some((v.clone(), members.clone())),
        },
        None => Verdict::Disagree {
            majority: None,
            suspects: (0..values.len()).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanimous_values_agree() {
        assert_eq!(reconcile(&[true, true, true], &[0, 0, 0]), Verdict::Agree(true));
    }

    #[test]
    fn strict_majority_flags_minority() {
        let v = reconcile(&[1, 2, 1, 1], &[0; 4]);
        assert_eq!(
            v,
            Verdict::Disagree {
                majority: Some((1, vec![0, 2, 3])),
                suspects: vec![1],
            }
        );
    }

    #[test]
    fn tie_broken_by_agreement_history() {
        let v = reconcile(&['a', 'b', 'a', 'b'], &[0, 3, 0, 1]);
        match v {
            Verdict::Disagree {
                majority: Some((winner, _)),
                suspects,
            } => {
                assert_eq!(winner, 'b');
                assert_eq!(suspects, vec![0, 2]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn full_tie_suspects_everyone() {
        let v = reconcile(&[false, true], &[2, 2]);
        assert_eq!(
            v,
            Verdict::Disagree {
                majority: None,
                suspects: vec![0, 1],
            }
        );
    }
}
