// Snapshot tests for the text the command-line front end prints

use eqstudio::recent::{RECENT_CHIP_CHARS, RECENT_CHIP_COUNT, RecentFormulas};
use eqstudio::templates::{self, describe};

#[test]
fn greek_category_listing() {
    let greek = templates::category("greek").unwrap();
    insta::assert_snapshot!(describe(greek), @r"
    Greek
      α Alpha          \alpha
      β Beta           \beta
      γ Gamma          \gamma
      δ Delta          \delta
      θ Theta          \theta
      λ Lambda         \lambda
      π Pi             \pi
      σ Sigma          \sigma
      ω Omega          \omega
    ");
}

#[test]
fn calculus_listing_keeps_latex_verbatim() {
    let integral = templates::find("integral").unwrap();
    insta::assert_snapshot!(integral.latex, @r"\int_{a}^{b} f(x) \, dx");
}

#[test]
fn recent_chips_are_shortened() {
    let mut recent = RecentFormulas::new();
    recent.record(r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}");
    recent.record("x^2");

    let chips = recent.previews(RECENT_CHIP_COUNT, RECENT_CHIP_CHARS).join(" | ");
    insta::assert_snapshot!(chips, @r"x^2 | \begin{pmatrix} a & ...");
}
