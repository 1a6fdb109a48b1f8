//! Headless CMS adapters.

mod cms_reader;

pub use cms_reader::CmsContentReader;
