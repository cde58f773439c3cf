//! function analysis layer: everything the tool reports about an expression
//! before plotting it
/// critical/inflection point search: symbolic solve first, numeric fallback
/// on unsupported equation classes, classification by the next derivative
pub mod extrema;
/// scalar root search on a uniform grid with bisection refinement
pub mod numeric_roots;
/// pretty-printed textual report of the symbolic analysis
pub mod report;
/// evaluation of expressions over linspace grids and 2D meshes
pub mod sampler;
