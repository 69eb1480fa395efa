use waypath_core::{Grid, Pos};

/// Replace every diagonal step of `path` with two orthogonal ones.
///
/// The elbow cell is taken horizontal-first (same row as the step's origin)
/// when walkable, vertical-first otherwise. If neither elbow is walkable the
/// offending step `(from, to)` is returned as the error.
pub fn expand_diagonals(grid: &Grid, path: &[Pos]) -> Result<Vec<Pos>, (Pos, Pos)> {
    let Some(&last) = path.last() else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(path.len() * 2);
    for w in path.windows(2) {
        let (a, b) = (w[0], w[1]);
        out.push(a);
        if !(b - a).is_diagonal() {
            continue;
        }
        let horizontal = Pos::new(a.row, b.col);
        let vertical = Pos::new(b.row, a.col);
        if grid.is_walkable(horizontal) {
            out.push(horizontal);
        } else if grid.is_walkable(vertical) {
            out.push(vertical);
        } else {
            return Err((a, b));
        }
    }
    out.push(last);
    Ok(out)
}
