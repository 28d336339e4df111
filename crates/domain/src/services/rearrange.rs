//! Link-ordering planner.
//!
//! Positions within one (profile, type) partition of non-deleted links form
//! a contiguous permutation starting at 1. Rearranging moves one link into
//! another link's slot by a single-slot insertion shift: the moved link is
//! removed from its slot and reinserted at the target's original slot, and
//! every link between them shifts by one to close the gap. The planner is
//! pure; the repository applies its output inside one transaction.

use uuid::Uuid;

/// A single position change produced by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    pub id: Uuid,
    pub position: i32,
}

/// Errors from planning a rearrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RearrangeError {
    /// One of the named links is not in the active partition.
    #[error("Invalid link id")]
    LinkNotFound,
}

/// Plans the position updates that move `link1` into `link2`'s slot.
///
/// `links` is the active (non-deleted) partition as `(id, position)` pairs;
/// order does not matter. Equal positions produce an empty plan. The plan
/// lists shifted neighbors first and the moved link last.
pub fn plan_rearrange(
    links: &[(Uuid, i32)],
    link1: Uuid,
    link2: Uuid,
) -> Result<Vec<PositionUpdate>, RearrangeError> {
    let pos_of = |id: Uuid| {
        links
            .iter()
            .find(|(link_id, _)| *link_id == id)
            .map(|(_, pos)| *pos)
            .ok_or(RearrangeError::LinkNotFound)
    };

    let from = pos_of(link1)?;
    let to = pos_of(link2)?;

    if from == to {
        return Ok(Vec::new());
    }

    let mut updates: Vec<PositionUpdate> = Vec::new();

    if from > to {
        // Moving up: neighbors in [to, from) shift down the list (+1).
        for &(id, pos) in links {
            if id != link1 && pos >= to && pos < from {
                updates.push(PositionUpdate { id, position: pos + 1 });
            }
        }
    } else {
        // Moving down: neighbors in (from, to] shift up the list (-1).
        for &(id, pos) in links {
            if id != link1 && pos > from && pos <= to {
                updates.push(PositionUpdate { id, position: pos - 1 });
            }
        }
    }

    updates.push(PositionUpdate {
        id: link1,
        position: to,
    });

    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(n: usize) -> Vec<(Uuid, i32)> {
        (1..=n).map(|i| (Uuid::new_v4(), i as i32)).collect()
    }

    fn apply(links: &[(Uuid, i32)], updates: &[PositionUpdate]) -> Vec<(Uuid, i32)> {
        let mut result = links.to_vec();
        for update in updates {
            let entry = result.iter_mut().find(|(id, _)| *id == update.id).unwrap();
            entry.1 = update.position;
        }
        result.sort_by_key(|(_, pos)| *pos);
        result
    }

    #[test]
    fn test_move_first_to_third_slot() {
        // [1,2,3,4]: moving the link at 1 onto the link at 3 lands it at 3
        // and the links originally at 2,3 shift to 1,2.
        let links = partition(4);
        let (a, b) = (links[0].0, links[2].0);

        let updates = plan_rearrange(&links, a, b).unwrap();
        let result = apply(&links, &updates);

        assert_eq!(
            result.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![links[1].0, links[2].0, a, links[3].0]
        );
        assert_eq!(
            result.iter().map(|(_, p)| *p).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_move_third_to_first_slot() {
        let links = partition(4);
        let (a, b) = (links[2].0, links[0].0);

        let updates = plan_rearrange(&links, a, b).unwrap();
        let result = apply(&links, &updates);

        assert_eq!(
            result.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![a, links[0].0, links[1].0, links[3].0]
        );
        assert_eq!(
            result.iter().map(|(_, p)| *p).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_equal_positions_is_a_no_op() {
        let links = partition(3);
        let a = links[1].0;
        assert_eq!(plan_rearrange(&links, a, a).unwrap(), Vec::new());
    }

    #[test]
    fn test_unknown_link_is_rejected() {
        let links = partition(3);
        assert_eq!(
            plan_rearrange(&links, Uuid::new_v4(), links[0].0),
            Err(RearrangeError::LinkNotFound)
        );
        assert_eq!(
            plan_rearrange(&links, links[0].0, Uuid::new_v4()),
            Err(RearrangeError::LinkNotFound)
        );
    }

    #[test]
    fn test_contiguity_preserved_for_all_pairs() {
        let links = partition(6);
        for i in 0..6 {
            for j in 0..6 {
                let updates = plan_rearrange(&links, links[i].0, links[j].0).unwrap();
                let result = apply(&links, &updates);
                let positions: Vec<i32> = result.iter().map(|(_, p)| *p).collect();
                assert_eq!(positions, (1..=6).collect::<Vec<_>>(), "i={} j={}", i, j);
            }
        }
    }

    #[test]
    fn test_moved_link_update_comes_last() {
        let links = partition(4);
        let updates = plan_rearrange(&links, links[0].0, links[2].0).unwrap();
        assert_eq!(updates.last().unwrap().id, links[0].0);
    }
}
