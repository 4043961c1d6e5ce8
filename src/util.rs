use crate::errors::{Error, Result};

/// Folds the results of closing several iterators into one.
/// Every failure is kept; nested `Close` errors are flattened.
pub(crate) fn join_close_results<I>(results: I, id: &str) -> Result<()>
    where I: IntoIterator<Item=Result<()>> {
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(()) => {}
            // already logged where it happened
            Err(Error::Close(nested)) => errors.extend(nested),
            Err(err) => {
                log::warn!("WARN: {}, {:?}", id, err);
                errors.push(err)
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Close(errors))
    }
}
