//! rendering paths of the tool; raster 2D goes through plotters, 3D goes
//! through gnuplot
/// heatmap of a complex-valued function over a rectangle of the complex plane
pub mod complex_map;
/// zero-contour of f(x,y) extracted by marching squares
pub mod implicit;
/// parametric curves: (x(t), y(t)) and (x(t), y(t), z(t))
pub mod parametric;
/// 2D line plots: single series with annotated markers, multi-series with legend
pub mod plots;
/// 3D surface of a single-variable function extruded along y
pub mod surface3d;
