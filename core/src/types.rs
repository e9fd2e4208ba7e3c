/// Single grid axis, used for rows, columns and offsets inside a shape.
pub type Coord = u8;

/// Grid position `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Signed axis for placement anchors, which an input adapter may report outside the grid.
pub type Offset = i16;

/// Placement anchor `(row, col)`: where the top-left cell of a shape's matrix lands.
pub type Offset2 = (Offset, Offset);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Widens grid coordinates into an anchor.
pub const fn to_anchor((row, col): Coord2) -> Offset2 {
    (row as Offset, col as Offset)
}

/// Applies a shape offset to `anchor`, returning a value only when it lands inside a
/// `bound`×`bound` grid.
pub fn apply_offset(anchor: Offset2, offset: Coord2, bound: Coord) -> Option<Coord2> {
    let in_bounds = |base: Offset, delta: Coord| -> Option<Coord> {
        let value = base.checked_add(delta.into())?;
        Coord::try_from(value).ok().filter(|&value| value < bound)
    };

    Some((in_bounds(anchor.0, offset.0)?, in_bounds(anchor.1, offset.1)?))
}
