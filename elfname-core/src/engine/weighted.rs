use rand::Rng;

/// Picks one item with probability proportional to `weight(item)`.
///
/// This method performs:
/// - an O(n) pass to total the weights
/// - a cumulative subtraction to select a bucket
///
/// Non-finite and non-positive weights count as zero. Returns `None` if
/// `items` is empty or every weight is zero.
pub fn choose<'a, T, R, F>(rng: &mut R, items: &'a [T], weight: F) -> Option<&'a T>
where
	R: Rng + ?Sized,
	F: Fn(&T) -> f64,
{
	choose_index(rng, items, weight).map(|i| &items[i])
}

/// Same as [`choose`] but returns the position of the chosen item.
pub fn choose_index<T, R, F>(rng: &mut R, items: &[T], weight: F) -> Option<usize>
where
	R: Rng + ?Sized,
	F: Fn(&T) -> f64,
{
	let weights: Vec<f64> = items.iter().map(|item| sanitize(weight(item))).collect();
	let total: f64 = weights.iter().sum();
	if total <= 0.0 {
		return None;
	}

	let mut r = rng.random::<f64>() * total;

	let mut fallback = None;
	for (i, w) in weights.iter().enumerate() {
		if *w <= 0.0 {
			continue;
		}
		if r < *w {
			return Some(i);
		}
		r -= w;
		fallback = Some(i);
	}

	// Rounding can leave a sliver past the last bucket.
	fallback
}

fn sanitize(weight: f64) -> f64 {
	if weight.is_finite() && weight > 0.0 { weight } else { 0.0 }
}

/// Uniform pick, `None` on an empty slice.
pub fn uniform<'a, T, R>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
	R: Rng + ?Sized,
{
	if items.is_empty() {
		return None;
	}
	Some(&items[rng.random_range(0..items.len())])
}

/// Bernoulli roll.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
	rng.random::<f64>() < p
}
