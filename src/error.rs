use thiserror::Error;

/// Configuration errors reported while building a [`crate::Virtualizer`] or running a query.
///
/// Indexes refer to positions in the entry sequence. Scrolling past all content is *not* an
/// error; it yields an empty result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VirtualizerError {
    /// The entry declares neither `fixed_size` nor `min_size`.
    #[error("entry {index} has neither a fixed size nor a minimum size")]
    MissingSize { index: usize },

    /// Two entries share an id.
    #[error("entry {duplicate} reuses the id of entry {first}")]
    DuplicateId { first: usize, duplicate: usize },

    /// A stretchable entry whose `max_size` is below its `min_size`.
    #[error("entry {index} has max size {max_size} below its min size {min_size}")]
    InvalidSizeRange {
        index: usize,
        min_size: u32,
        max_size: u32,
    },

    /// The weight is zero, negative, or not finite.
    #[error("entry {index} has a weight that is not a positive finite number")]
    InvalidWeight { index: usize },

    /// The viewport has no extent.
    #[error("viewport size must be greater than zero")]
    DegenerateViewport,
}
