// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Share-slug generation.

use rand::Rng;

/// The URL-safe alphabet slugs are drawn from.
const SLUG_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of a generated share slug.
pub const SLUG_LENGTH: usize = 10;

/// Generates a random URL-safe share slug.
///
/// Uniqueness is enforced by the database; callers retry on collision.
#[must_use]
pub fn generate_slug() -> String {
    let mut rng = rand::rng();
    (0..SLUG_LENGTH)
        .map(|_| {
            let idx: usize = rng.random_range(0..SLUG_ALPHABET.len());
            char::from(SLUG_ALPHABET[idx])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_have_the_expected_length_and_alphabet() {
        for _ in 0..100 {
            let slug: String = generate_slug();
            assert_eq!(slug.len(), SLUG_LENGTH);
            assert!(slug.bytes().all(|b| SLUG_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn slugs_are_not_constant() {
        let first: String = generate_slug();
        let distinct = (0..20).any(|_| generate_slug() != first);
        assert!(distinct);
    }
}
