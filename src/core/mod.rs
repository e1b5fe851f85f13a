//! Core-Domänentypen: Polylinien, Polyline-Store, Endpunkt-Index, Geometrie, Topologie.

pub mod error;
pub mod geometry;
pub mod mode;
pub mod polyline;
/// Polyline-Store
///
/// Alleiniger Besitzer aller finalisierten Polylinien:
/// - Einfügen, Entfernen, Verlängern, Ausdünnen, Verbinden
/// - Einzel-Selektion als ID (nie als Referenz)
pub mod polyline_store;
pub mod spatial;
pub mod topology;

pub use error::EditError;
pub use geometry::{
    distance_between_segments, distance_to_polyline, distance_to_segment, nearest_vertex, Bounds3,
    Point3,
};
pub use mode::EditorMode;
pub use polyline::{Polyline, PolylineEnd, PolylineId, PolylineRecord};
pub use polyline_store::{PointDeletion, PolylineStore};
pub use spatial::{EndpointIndex, EndpointMatch};
pub use topology::{
    mean_vertex_spacing, mesh_boundary_vertices, PolylineTopology, Termination, TopologyClassifier,
};
