use std::{fmt::Display, future::Future, time::Duration};

use tokio::time;

/// Runs a soft pipeline stage. Failure or expiry of `timeout` is logged and replaced by
/// `fallback()`, so the caller always gets a value.
pub async fn soften<T, E, F>(
	stage: &'static str,
	timeout: Duration,
	future: F,
	fallback: impl FnOnce() -> T,
) -> T
where
	F: Future<Output = Result<T, E>>,
	E: Display,
{
	match time::timeout(timeout, future).await {
		Ok(Ok(value)) => value,
		Ok(Err(err)) => {
			tracing::warn!(stage, error = %err, "Stage failed. Using fallback.");

			fallback()
		},
		Err(_) => {
			tracing::warn!(stage, timeout = ?timeout, "Stage timed out. Using fallback.");

			fallback()
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn passes_success_through() {
		let value = soften(
			"test",
			Duration::from_secs(1),
			async { Ok::<_, String>(7) },
			|| 0,
		)
		.await;

		assert_eq!(value, 7);
	}

	#[tokio::test]
	async fn errors_become_fallback() {
		let value = soften(
			"test",
			Duration::from_secs(1),
			async { Err::<u32, _>("boom".to_string()) },
			|| 42,
		)
		.await;

		assert_eq!(value, 42);
	}

	#[tokio::test]
	async fn expiry_becomes_fallback() {
		let value = soften(
			"test",
			Duration::from_millis(10),
			async {
				time::sleep(Duration::from_secs(5)).await;

				Ok::<_, String>(1)
			},
			|| 2,
		)
		.await;

		assert_eq!(value, 2);
	}
}
