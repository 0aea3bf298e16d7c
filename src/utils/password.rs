/// Strength meter shown under password inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0..=4, one bar per point.
    pub score: u8,
    pub message: &'static str,
}

/// Scores a password: one point each for length >= 8, length >= 12, an
/// uppercase letter, a digit and a symbol, capped at 4.
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let checks = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|passed| **passed).count().min(4) as u8;

    let message = if len == 0 {
        ""
    } else if score <= 2 {
        "Weak password"
    } else if score == 3 {
        "Medium strength"
    } else {
        "Strong password"
    };

    PasswordStrength { score, message }
}
