use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Results of [`map_isolated`]: one value per input, plus how many of them
/// came from the fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Isolated<U> {
    pub values: Vec<U>,
    pub failures: usize,
}

/// Apply `op` to every item in order. When `op` fails for an item, `fallback`
/// produces that item's value instead and the rest of the sequence still runs.
///
/// Items are processed one at a time; the output has the input's length
/// and order.
pub async fn map_isolated<T, U, E, F, Fut, G>(
    operation_name: &str,
    items: impl IntoIterator<Item = T>,
    mut op: F,
    mut fallback: G,
) -> Isolated<U>
where
    T: Clone,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
    E: Display,
    G: FnMut(T, &E) -> U,
{
    let mut values = Vec::new();
    let mut failures = 0;

    for (index, item) in items.into_iter().enumerate() {
        match op(item.clone()).await {
            Ok(value) => values.push(value),
            Err(e) => {
                failures += 1;
                warn!(
                    operation = operation_name,
                    index,
                    error = %e,
                    "Operation failed for element, using fallback"
                );
                values.push(fallback(item, &e));
            }
        }
    }

    Isolated { values, failures }
}
