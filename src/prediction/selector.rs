use rand::Rng;

use crate::error::{Error, Result};
use crate::prediction::PredictionEntry;

/// Pick one entry uniformly at random. An empty slice is a static-data bug
/// and is reported as `InvalidInput` rather than panicking.
pub fn select<'a, R: Rng + ?Sized>(
    catalog: &'a [PredictionEntry],
    rng: &mut R,
) -> Result<&'a PredictionEntry> {
    if catalog.is_empty() {
        return Err(Error::InvalidInput("cannot select from an empty catalog".to_string()));
    }
    let idx = rng.gen_range(0..catalog.len());
    Ok(&catalog[idx])
}
