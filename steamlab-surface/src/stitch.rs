//! Dome excision and zipper stitching.
//!
//! The grid is uniform when viewed along the volume axis, but the two-phase
//! dome is invisible from that perspective: grid triangles simply span the
//! gap between the saturated-liquid and saturated-vapor branches. This module
//! removes those spanning triangles, collects the vertices they leave behind
//! ("orphans") on each side of the cut, and zips the sorted orphan sequences
//! against the dome-boundary ladder to close the seam.

use glam::Vec3;

/// Result of the excision pass.
pub(crate) struct Excision {
    /// Triangles that survive, in their original order.
    pub retained: Vec<[u32; 3]>,
    /// Cut-edge vertices on the liquid side, unsorted and with duplicates.
    pub left_orphans: Vec<u32>,
    /// Cut-edge vertices on the vapor side, unsorted and with duplicates.
    pub right_orphans: Vec<u32>,
    /// Spanning triangles removed.
    pub excised: usize,
    /// Removed triangles whose vertices could not be classified because one
    /// sat exactly on the midline; conservatively dropped without orphans.
    pub unclassified: usize,
}

/// Removes grid triangles that span the dome and classifies their vertices.
///
/// Walks the triangles in order, keeping a per-side "current rung" into the
/// dome-boundary ladder that advances monotonically as triangles reach
/// higher plotted pressures. A triangle is excised when it sits below the
/// dome ceiling and its vertices straddle the midline between the current
/// liquid and vapor rungs. The survivors are returned as a filtered copy;
/// nothing is edited in place.
pub(crate) fn excise_spanning_triangles(
    positions: &[Vec3],
    triangles: &[[u32; 3]],
    dome_start: usize,
    dome_end: usize,
    ceiling: f32,
) -> Excision {
    let mut retained = Vec::with_capacity(triangles.len());
    let mut left_orphans = Vec::new();
    let mut right_orphans = Vec::new();
    let mut excised = 0;
    let mut unclassified = 0;

    let mut left_ladder = dome_start;
    let mut right_ladder = dome_start + 1;

    for tri in triangles {
        let [ai, bi, ci] = *tri;
        let a = positions[ai as usize];
        let b = positions[bi as usize];
        let c = positions[ci as usize];
        let top = a.y.max(b.y).max(c.y);

        // Advance each rung while the triangles climb past it.
        if positions[left_ladder + 2].y < top && left_ladder + 4 < dome_end {
            left_ladder += 2;
        }
        if positions[right_ladder + 2].y < top && right_ladder + 4 < dome_end {
            right_ladder += 2;
        }

        let midline = (positions[left_ladder].x + positions[right_ladder].x) / 2.0;
        let below_ceiling = a.y < ceiling || b.y < ceiling || c.y < ceiling;
        let some_left = a.x < midline || b.x < midline || c.x < midline;
        let some_right = a.x > midline || b.x > midline || c.x > midline;

        if !(below_ceiling && some_left && some_right) {
            retained.push(*tri);
            continue;
        }

        excised += 1;
        let on_midline = a.x == midline || b.x == midline || c.x == midline;
        if on_midline {
            // No safe side to stitch an on-midline vertex to; drop the
            // triangle whole rather than mis-stitch it.
            unclassified += 1;
        } else if a.x < midline && b.x < midline {
            left_orphans.extend([ai, bi]);
            right_orphans.push(ci);
        } else if b.x < midline && c.x < midline {
            left_orphans.extend([bi, ci]);
            right_orphans.push(ai);
        } else if c.x < midline && a.x < midline {
            left_orphans.extend([ci, ai]);
            right_orphans.push(bi);
        } else if a.x < midline {
            right_orphans.extend([bi, ci]);
            left_orphans.push(ai);
        } else if b.x < midline {
            right_orphans.extend([ai, ci]);
            left_orphans.push(bi);
        } else if c.x < midline {
            right_orphans.extend([ai, bi]);
            left_orphans.push(ci);
        } else {
            // Unreachable for finite coordinates; guards against NaN.
            unclassified += 1;
        }
    }

    Excision {
        retained,
        left_orphans,
        right_orphans,
        excised,
        unclassified,
    }
}

/// Sorts orphans by plotted (pressure, temperature) and removes adjacent
/// duplicates contributed by neighboring excised triangles.
pub(crate) fn normalize_orphans(positions: &[Vec3], orphans: &mut Vec<u32>) {
    orphans.sort_by(|&ai, &bi| {
        let a = positions[ai as usize];
        let b = positions[bi as usize];
        a.y.total_cmp(&b.y).then(a.z.total_cmp(&b.z))
    });
    orphans.dedup();
}

/// Zips the liquid-side orphans against the liquid side of the ladder.
///
/// Two-pointer merge: while the next orphan still falls within the current
/// rung interval, emit a triangle fanning from the ladder vertex across two
/// consecutive orphans; otherwise step the ladder and bridge the rung gap
/// with the current orphan. Returns the index of the last orphan consumed.
///
/// Requires at least three orphans.
pub(crate) fn stitch_left(
    positions: &[Vec3],
    orphans: &[u32],
    dome_start: usize,
    dome_end: usize,
    out: &mut Vec<[u32; 3]>,
) -> usize {
    let mut ladder = dome_start;
    let mut rung = positions[ladder + 2];

    out.push([ladder as u32, orphans[0], orphans[1]]);
    let mut orphan = 1;
    let mut orphan_rung = positions[orphans[orphan + 1] as usize];

    while ladder + 2 < dome_end {
        while orphan_rung.z <= rung.z && orphan_rung.y <= rung.y && orphan + 1 < orphans.len() {
            out.push([ladder as u32, orphans[orphan], orphans[orphan + 1]]);
            orphan += 1;
            if orphan + 1 < orphans.len() {
                orphan_rung = positions[orphans[orphan + 1] as usize];
            }
        }
        if ladder + 2 < dome_end {
            out.push([ladder as u32, orphans[orphan], (ladder + 2) as u32]);
            ladder += 2;
            if ladder + 2 < dome_end {
                rung = positions[ladder + 2];
            }
        }
    }
    orphan
}

/// Mirror of [`stitch_left`] for the vapor side, with the winding flipped so
/// the faces keep pointing outward.
///
/// Requires at least two orphans.
pub(crate) fn stitch_right(
    positions: &[Vec3],
    orphans: &[u32],
    dome_start: usize,
    dome_end: usize,
    out: &mut Vec<[u32; 3]>,
) -> usize {
    let mut orphan = 0;
    let mut orphan_rung = positions[orphans[1] as usize];

    let mut ladder = dome_start + 1;
    let mut rung = positions[ladder + 2];
    out.push([orphans[0], ladder as u32, (ladder + 2) as u32]);
    ladder += 2;
    let mut ladder_point = positions[ladder];

    while ladder + 2 < dome_end {
        while (ladder_point.y > orphan_rung.y || rung.z > orphan_rung.z)
            && orphan + 1 < orphans.len()
        {
            out.push([orphans[orphan], ladder as u32, orphans[orphan + 1]]);
            orphan += 1;
            if orphan + 1 < orphans.len() {
                orphan_rung = positions[orphans[orphan + 1] as usize];
            }
        }
        if ladder + 2 < dome_end {
            out.push([orphans[orphan], ladder as u32, (ladder + 2) as u32]);
            ladder += 2;
            ladder_point = positions[ladder];
            if ladder + 2 < dome_end {
                rung = positions[ladder + 2];
            }
        }
    }
    orphan
}

/// Fans every orphan above the last stitched one into the apex vertex,
/// closing the top of the cut.
pub(crate) fn fan_apex(
    left_orphans: &[u32],
    right_orphans: &[u32],
    left_consumed: usize,
    right_consumed: usize,
    apex: u32,
    out: &mut Vec<[u32; 3]>,
) {
    for i in left_consumed + 1..left_orphans.len() {
        out.push([left_orphans[i - 1], left_orphans[i], apex]);
    }
    for i in right_consumed + 1..right_orphans.len() {
        out.push([right_orphans[i], right_orphans[i - 1], apex]);
    }
    out.push([
        *left_orphans.last().expect("left orphans are non-empty"),
        *right_orphans.last().expect("right orphans are non-empty"),
        apex,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(positions: &[(f32, f32, f32)]) -> Vec<Vec3> {
        positions
            .iter()
            .map(|&(x, y, z)| Vec3::new(x, y, z))
            .collect()
    }

    #[test]
    fn orphans_sort_by_pressure_then_temperature() {
        let positions = flat(&[
            (0.0, 0.5, 0.2),
            (0.0, 0.1, 0.9),
            (0.0, 0.5, 0.1),
            (0.0, 0.1, 0.1),
        ]);
        let mut orphans = vec![0, 1, 2, 3, 2, 0];

        normalize_orphans(&positions, &mut orphans);
        assert_eq!(orphans, vec![3, 1, 2, 0]);
    }

    #[test]
    fn a_triangle_with_a_vertex_on_the_midline_is_dropped_whole() {
        // Ladder rungs at x = 0.25 and 0.75 put the midline at exactly
        // x = 0.5; the second triangle has a vertex right there.
        let positions = flat(&[
            (0.2, 0.1, 0.0),
            (0.8, 0.1, 0.1),
            (0.8, 0.2, 0.1),
            (0.5, 0.3, 0.0),
            // Dome ladder: liquid/vapor pairs.
            (0.25, 0.0, 0.0),
            (0.75, 0.0, 0.0),
            (0.25, 1.0, 0.0),
            (0.75, 1.0, 0.0),
        ]);
        let triangles = [[0, 1, 2], [3, 1, 0]];

        let excision = excise_spanning_triangles(&positions, &triangles, 4, 8, 0.9);

        assert_eq!(excision.excised, 2);
        assert_eq!(excision.unclassified, 1);
        assert!(excision.retained.is_empty());
        // Only the cleanly classified triangle contributes orphans.
        assert_eq!(excision.left_orphans, vec![0]);
        assert_eq!(excision.right_orphans, vec![1, 2]);
    }

    #[test]
    fn triangles_above_the_ceiling_survive() {
        let positions = flat(&[
            (0.2, 0.95, 0.0),
            (0.8, 0.95, 0.1),
            (0.8, 0.97, 0.1),
            (0.4, 0.0, 0.0),
            (0.6, 0.0, 0.0),
            (0.4, 1.0, 0.0),
            (0.6, 1.0, 0.0),
        ]);
        let triangles = [[0, 1, 2]];

        let excision = excise_spanning_triangles(&positions, &triangles, 3, 7, 0.9);

        assert_eq!(excision.excised, 0);
        assert_eq!(excision.retained, vec![[0, 1, 2]]);
    }
}
