mod condition_catalog;
mod condition_class;
mod condition_record;
mod condition_source;
mod condition_source_error;
mod incident;
mod snow_management;
mod special_event;
mod weather;
mod work_zone;

pub use condition_catalog::ConditionCatalog;
pub use condition_class::ConditionClass;
pub use condition_record::ConditionRecord;
pub use condition_source::ConditionSource;
pub use condition_source_error::ConditionSourceError;
pub use incident::Incident;
pub use snow_management::{SnowManagement, SnowRoute};
pub use special_event::SpecialEvent;
pub use weather::{PrecipitationIntensity, PrecipitationType, WeatherReading, WeatherStation};
pub use work_zone::{WorkZone, WorkZoneFeature, WorkZoneLaneConfig};
