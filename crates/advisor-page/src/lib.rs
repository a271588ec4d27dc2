//! Financial professional profile pages.
//!
//! This crate turns one advisor record from the content platform's stream
//! into a static HTML page: the page path and legacy redirects, the head
//! metadata, and a body laid out like the firm's profile template.
//!
//! # Architecture
//!
//! - [`Record`]: typed view of the stream document
//! - [`PageRenderer`]: path, head and body for one record, as an HTML document
//! - [`PageBuilder`]: stream checks plus writing the page and `_redirects`
//!
//! # Example
//!
//! ```
//! use advisor_page::{PageRenderer, Record};
//!
//! let record = Record::from_json(
//!     r#"{"id": "7", "locale": "en", "name": "Jane Doe",
//!         "address": {"line1": "1 Main St", "city": "Austin", "region": "TX"}}"#,
//! )
//! .unwrap();
//! let page = PageRenderer::default().render(&record, None);
//! assert_eq!(page.path, "en/TX/Austin/1 Main St-7");
//! ```

mod builder;
mod format;
mod head;
mod hours;
mod page;
mod path;
mod record;
pub mod related;
pub mod schema;
mod stream;
mod view;

pub use builder::{BuildConfig, BuildError, BuildOutput, PageBuilder, REDIRECTS_FILE, redirect_rule};
pub use format::{DisplayName, FIRM_PREFIX, format_phone, split_display_name};
pub use head::{CHARSET, HeadConfig, HeadTag, TagKind, VIEWPORT, build_head};
pub use hours::{
    DayHours, HolidayHours, Hours, Interval, Weekday, format_time, render_hours,
};
pub use page::{PageRenderer, PageRendererConfig, RenderedPage};
pub use path::{output_file, relative_prefix_to_root, resolve_path, resolve_redirects};
pub use record::{
    Address, Coordinate, Education, EntityMeta, EntityType, Faq, Image, ImageField, Record,
    RecordError, RelatedItem, SiteEntity,
};
pub use related::render_related;
pub use schema::structured_data;
pub use stream::{
    ENTITY_TYPE, Localization, SAVED_FILTER_ID, STREAM_FIELDS, StreamConfig, StreamFilter,
};
pub use view::{EditLink, RenderContext, render_body};
