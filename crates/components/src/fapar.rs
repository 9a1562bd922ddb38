//! Vegetation stress from the fAPAR anomaly product.

use cdi_calendar::generate;
use cdi_spatial::GriddedDataset;

use crate::align;
use crate::component::ComponentSeries;
use crate::context::{RequestContext, Window};
use crate::error::ComponentError;
use crate::kind::{ComponentKind, FAPAR_PRODUCT, Variant};

const KIND: ComponentKind = ComponentKind::Fapar;

pub(crate) fn product(
    ctx: &RequestContext,
    window: Window,
    dataset: &GriddedDataset,
) -> Result<ComponentSeries, ComponentError> {
    let grid = generate(window.start(), window.end())
        .map_err(|e| ComponentError::alignment(KIND, e))?;
    let (mask, field) = align::select(ctx, KIND, align::variable(KIND, dataset, FAPAR_PRODUCT)?)?;
    let field = align::onto_dekads(KIND, &field, &grid)?;
    Ok(ComponentSeries::new(Variant::FaparProduct, field, mask))
}
