use {
    super::{Grid3D, AXIS_DELTAS_3D},
    bitvec::prelude::*,
    glam::IVec3,
    std::collections::{HashSet, VecDeque},
};

/// The unoccupied lattice cells reachable from outside `occupied` by face-adjacent steps that
/// never cross an occupied cell.
///
/// The fill runs over the axis-aligned bounding box of `occupied` expanded by one unit on every
/// side, so the minimum corner of the box is always unoccupied and connected to the rest of the
/// exterior. Unoccupied cells within the box that are absent from the result are enclosed
/// pockets: together with `occupied` and the result they partition the box, and no cell is both
/// exterior and pocket.
///
/// An empty `occupied` set has no bounding box and yields an empty result.
pub fn flood_fill_exterior(occupied: &HashSet<IVec3>) -> HashSet<IVec3> {
    let mut exterior: HashSet<IVec3> = HashSet::new();

    let Some(&first) = occupied.iter().next() else {
        return exterior;
    };

    let (min, max): (IVec3, IVec3) = occupied
        .iter()
        .fold((first, first), |(min, max), pos| {
            (min.min(*pos), max.max(*pos))
        });
    let min: IVec3 = min - IVec3::ONE;
    let max: IVec3 = max + IVec3::ONE;

    let mut lattice: Grid3D<bool> = Grid3D::default(max - min + IVec3::ONE);

    for pos in occupied {
        *lattice.get_mut(&(*pos - min)).unwrap() = true;
    }

    let mut visited: BitVec = bitvec![0; lattice.cells().len()];
    let mut queue: VecDeque<IVec3> = VecDeque::new();

    visited.set(lattice.index_from_pos(&IVec3::ZERO), true);
    exterior.insert(min);
    queue.push_back(IVec3::ZERO);

    while let Some(current) = queue.pop_front() {
        for delta in AXIS_DELTAS_3D {
            let neighbor: IVec3 = current + delta;

            if let Some(index) = lattice.try_index_from_pos(&neighbor) {
                if !lattice.cells()[index] && !visited[index] {
                    visited.set(index, true);
                    exterior.insert(neighbor + min);
                    queue.push_back(neighbor);
                }
            }
        }
    }

    exterior
}
