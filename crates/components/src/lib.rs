//! # cdi-components
//!
//! The three drought signals combined by the composite indicator, each
//! available in one or more variants:
//!
//! | Variant | Input | Output axis |
//! |---------|-------|-------------|
//! | [`Variant::SpiFitted`] | `total_precipitation`, gamma-fitted per cell | month starts |
//! | [`Variant::SpiProduct`] | `spg03` | month starts |
//! | [`Variant::SmaFitted`] | soil water, standardised against a baseline | dekads |
//! | [`Variant::SmaProduct`] | `smant`, gaps filled from `smand` | dekads |
//! | [`Variant::FaparProduct`] | `fpanv` | dekads |
//!
//! Data enters through the [`Retriever`] trait and fitted indices through
//! [`DistributionFit`], so both can be swapped without touching the
//! processing pipeline.
//!
//! ```ignore
//! use std::sync::Arc;
//! use cdi_components::{ComponentKind, ComponentSource, IndexComponent, RequestContext};
//!
//! let ctx = Arc::new(RequestContext::new(selection, window, baseline, retriever));
//! let mut spi = IndexComponent::for_kind(ComponentKind::Spi, ComponentSource::Fitted, window, ctx)?;
//! let series = spi.process()?;
//! ```

mod align;
mod component;
mod context;
mod error;
mod fapar;
mod fit;
mod kind;
mod retriever;
mod soil;
mod spi;

pub use component::{ComponentSeries, IndexComponent};
pub use context::{RequestContext, Window};
pub use error::{ComponentError, RetrieveError};
pub use fit::{DistributionFit, GammaFit};
pub use kind::{
    ComponentKind, ComponentSource, DEFAULT_SOIL_WATER, FAPAR_PRODUCT, Metadata, PRECIPITATION,
    SMA_MODELLED, SMA_PRODUCT, SPI_PRODUCT, Variant,
};
pub use retriever::{FetchRequest, MemoryRetriever, Retriever};
