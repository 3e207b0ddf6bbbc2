use std::collections::HashMap;

/// A cell corner `(x_edge, y_edge)`; pixel `(y, x)` spans corners `x..=x+1`
/// and `y..=y+1`.
pub(crate) type Corner = (usize, usize);

/// Traces the outer boundary of the pixels where `inside(y, x)` holds in an
/// `ny` by `nx` slice.
///
/// Boundary edges are oriented with the filled side on the left and chained
/// into loops; where two filled pixels touch only at a corner the walk turns
/// left. A cavity that meets the background at a single corner still makes
/// the walk revisit that corner, so loops are split wherever a corner
/// repeats. Collinear runs are merged. Returns the simple loop of largest
/// signed area, counter-clockwise in index space, or `None` for an empty
/// slice.
pub(crate) fn outer_boundary(
    ny: usize,
    nx: usize,
    inside: impl Fn(usize, usize) -> bool,
) -> Option<Vec<Corner>> {
    let filled = |y: usize, x: usize| y < ny && x < nx && inside(y, x);

    let mut edges: Vec<(Corner, Corner)> = Vec::new();
    for y in 0..ny {
        for x in 0..nx {
            if !filled(y, x) {
                continue;
            }
            if y == 0 || !filled(y - 1, x) {
                edges.push(((x, y), (x + 1, y)));
            }
            if !filled(y, x + 1) {
                edges.push(((x + 1, y), (x + 1, y + 1)));
            }
            if !filled(y + 1, x) {
                edges.push(((x + 1, y + 1), (x, y + 1)));
            }
            if x == 0 || !filled(y, x - 1) {
                edges.push(((x, y + 1), (x, y)));
            }
        }
    }

    let mut outgoing: HashMap<Corner, Vec<usize>> = HashMap::new();
    for (i, (from, _)) in edges.iter().enumerate() {
        outgoing.entry(*from).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut best: Option<(i64, Vec<Corner>)> = None;
    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        let traced = trace_loop(start, &edges, &outgoing, &mut used);
        for ring in split_at_repeats(traced) {
            let area2 = twice_signed_area(&ring);
            if best.as_ref().is_none_or(|(a, _)| area2 > *a) {
                best = Some((area2, ring));
            }
        }
    }
    best.map(|(_, ring)| merge_collinear(&ring))
}

/// Follows edges from `start` until the walk returns to it.
fn trace_loop(
    start: usize,
    edges: &[(Corner, Corner)],
    outgoing: &HashMap<Corner, Vec<usize>>,
    used: &mut [bool],
) -> Vec<Corner> {
    let mut ring = Vec::new();
    let mut current = start;
    for _ in 0..edges.len() {
        used[current] = true;
        let (from, to) = edges[current];
        ring.push(from);

        let incoming = direction(from, to);
        let Some(next) = outgoing.get(&to).and_then(|candidates| {
            candidates
                .iter()
                .copied()
                .max_by_key(|&e| turn_rank(incoming, direction(edges[e].0, edges[e].1)))
        }) else {
            break;
        };
        if next == start || used[next] {
            break;
        }
        current = next;
    }
    ring
}

/// Cuts a closed walk into loops that each visit every corner once.
fn split_at_repeats(walk: Vec<Corner>) -> Vec<Vec<Corner>> {
    let mut loops = Vec::new();
    let mut path: Vec<Corner> = Vec::with_capacity(walk.len());
    let mut position: HashMap<Corner, usize> = HashMap::new();
    for corner in walk {
        if let Some(&start) = position.get(&corner) {
            let sub: Vec<Corner> = path.drain(start..).collect();
            for c in &sub {
                position.remove(c);
            }
            loops.push(sub);
        }
        position.insert(corner, path.len());
        path.push(corner);
    }
    if !path.is_empty() {
        loops.push(path);
    }
    loops
}

#[allow(clippy::cast_possible_wrap)]
fn direction(from: Corner, to: Corner) -> (i64, i64) {
    (
        to.0 as i64 - from.0 as i64,
        to.1 as i64 - from.1 as i64,
    )
}

/// Left turn beats straight beats right turn.
fn turn_rank(incoming: (i64, i64), outgoing: (i64, i64)) -> i64 {
    (incoming.0 * outgoing.1 - incoming.1 * outgoing.0).signum()
}

#[allow(clippy::cast_possible_wrap)]
fn twice_signed_area(ring: &[Corner]) -> i64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (x0, y0) = ring[i];
            let (x1, y1) = ring[(i + 1) % n];
            x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64
        })
        .sum()
}

/// Drops corners where the walk goes straight on.
fn merge_collinear(ring: &[Corner]) -> Vec<Corner> {
    let n = ring.len();
    (0..n)
        .filter(|&i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            direction(prev, ring[i]) != direction(ring[i], next)
        })
        .map(|i| ring[i])
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid<'a>(rows: &'a [&'a str]) -> impl Fn(usize, usize) -> bool + 'a {
        move |y, x| rows[y].as_bytes()[x] == b'#'
    }

    #[test]
    fn single_pixel_is_unit_square() {
        let ring = outer_boundary(1, 1, |_, _| true).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(twice_signed_area(&ring), 2);
    }

    #[test]
    fn rectangle_merges_to_four_corners() {
        let ring = outer_boundary(3, 4, |_, _| true).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(twice_signed_area(&ring), 2 * 12);
        assert!(ring.contains(&(0, 0)));
        assert!(ring.contains(&(4, 3)));
    }

    #[test]
    fn empty_slice_has_no_boundary() {
        assert!(outer_boundary(2, 2, |_, _| false).is_none());
    }

    #[test]
    fn l_shape() {
        let rows = ["#..", "#..", "###"];
        let ring = outer_boundary(3, 3, grid(&rows)).unwrap();
        assert_eq!(ring.len(), 6);
        assert_eq!(twice_signed_area(&ring), 2 * 5);
    }

    #[test]
    fn hole_is_ignored() {
        let rows = ["###", "#.#", "###"];
        let ring = outer_boundary(3, 3, grid(&rows)).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(twice_signed_area(&ring), 2 * 9);
    }

    #[test]
    fn diagonal_contact_splits_loops() {
        let rows = ["##.", "##.", "..#"];
        let ring = outer_boundary(3, 3, grid(&rows)).unwrap();
        // The 2x2 block wins; the lone pixel forms its own loop.
        assert_eq!(twice_signed_area(&ring), 2 * 4);
        let mut unique = ring.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ring.len());
    }

    #[test]
    fn cavity_meeting_background_at_a_corner() {
        // One face-connected group; the centre cavity touches the empty
        // corner pixel only at corner (2, 2).
        let rows = ["###", "#.#", "##."];
        let ring = outer_boundary(3, 3, grid(&rows)).unwrap();
        let mut unique = ring.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ring.len());
        // The 3x3 square less the missing corner pixel.
        assert_eq!(twice_signed_area(&ring), 2 * 8);
        assert_eq!(ring.len(), 6);
        assert!(ring.contains(&(2, 2)));
    }

    #[test]
    fn repeated_corner_splits_walk() {
        let walk = vec![(0, 0), (2, 0), (2, 2), (3, 2), (3, 3), (2, 3), (2, 2), (0, 2)];
        let loops = split_at_repeats(walk);
        assert_eq!(
            loops,
            vec![
                vec![(2, 2), (3, 2), (3, 3), (2, 3)],
                vec![(0, 0), (2, 0), (2, 2), (0, 2)],
            ]
        );
    }

    #[test]
    fn pinched_ring_visits_each_corner_once() {
        // A ring of pixels closed through a diagonal contact.
        let rows = [".##", "#.#", "##."];
        let ring = outer_boundary(3, 3, grid(&rows)).unwrap();
        let mut unique = ring.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ring.len());
        assert!(twice_signed_area(&ring) > 0);
    }
}
