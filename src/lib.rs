pub mod geom;
pub mod io;
pub mod sim;
pub mod site;
pub mod time;

// Prelude
pub use geom::point::{Point, Point2};
pub use geom::polygon::Polygon;
pub use geom::segment::WallSegment;
pub use geom::vector::Vector;
pub use site::{SiteConfig, SiteZone, ZoneKind};
pub use sim::solar::SolarPosition;
pub use time::{ClockTime, LocalDate};
