/// Assumed attacker speed, a modern multi-GPU rig.
pub const GUESSES_PER_SECOND: f64 = 1_000_000_000.0;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;
const CENTURY: f64 = 3_153_600_000.0;

/// Average-case time to brute force, half of the search space.
pub fn seconds_to_crack(entropy: f64) -> f64 {
    let entropy = if entropy.is_nan() { 0.0 } else { entropy };
    2f64.powf(entropy) / GUESSES_PER_SECOND / 2.0
}

pub fn estimate_crack_time(entropy: f64) -> String {
    let seconds = seconds_to_crack(entropy);

    if seconds < 1.0 {
        "Instantly".to_owned()
    } else if seconds < MINUTE {
        format!("{:.2} seconds", seconds)
    } else if seconds < HOUR {
        format!("{:.2} minutes", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{:.2} hours", seconds / HOUR)
    } else if seconds < YEAR {
        format!("{:.2} days", seconds / DAY)
    } else if seconds < CENTURY {
        format!("{:.2} years", seconds / YEAR)
    } else if seconds < CENTURY * 1000.0 {
        format!("{:.0} years", seconds / YEAR)
    } else {
        "Millions of years+".to_owned()
    }
}
