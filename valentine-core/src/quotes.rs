use rand::Rng;
use rand::seq::SliceRandom;

pub const LOVE_QUOTES: [&str; 8] = [
    "Every pixel on this page was coded thinking of you 💖",
    "112 chocolates, infinite love ∞",
    "Even mycode has a crush on you 😊",
    "Loading love... 100% complete ✨",
    "Compiling emotions... Success! ❤️",
    "Error: Cannot stop loving you 💝",
    "You're the CSS to my HTML 💕",
    "Together we're better than any framework 🌟",
];

#[must_use]
pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LOVE_QUOTES.choose(rng).copied().unwrap_or(LOVE_QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn picks_come_from_the_list_and_vary() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x14_02);
        let picks: Vec<_> = (0..64).map(|_| random_quote(&mut rng)).collect();
        assert!(picks.iter().all(|q| LOVE_QUOTES.contains(q)));
        assert!(picks.iter().any(|q| *q != picks[0]));
    }

    #[test]
    fn same_seed_same_quote() {
        let a = random_quote(&mut ChaCha8Rng::seed_from_u64(7));
        let b = random_quote(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
