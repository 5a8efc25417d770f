// Catalog of LaTeX snippets offered as one-click templates.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub label: &'static str,
    pub latex: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateCategory {
    pub name: &'static str,
    /// Quick categories are always offered; the rest only when enabled in the
    /// settings.
    pub quick: bool,
    pub templates: &'static [Template],
}

const fn t(label: &'static str, latex: &'static str, icon: &'static str) -> Template {
    Template { label, latex, icon }
}

pub static CATEGORIES: &[TemplateCategory] = &[
    TemplateCategory {
        name: "Basic",
        quick: true,
        templates: &[
            t("Fraction", r"\frac{a}{b}", "½"),
            t("Square Root", r"\sqrt{x}", "√"),
            t("Power", "x^{n}", "xⁿ"),
            t("Subscript", "x_{i}", "xᵢ"),
            t("nth Root", r"\sqrt[n]{x}", "ⁿ√"),
        ],
    },
    TemplateCategory {
        name: "Greek",
        quick: true,
        templates: &[
            t("Alpha", r"\alpha", "α"),
            t("Beta", r"\beta", "β"),
            t("Gamma", r"\gamma", "γ"),
            t("Delta", r"\delta", "δ"),
            t("Theta", r"\theta", "θ"),
            t("Lambda", r"\lambda", "λ"),
            t("Pi", r"\pi", "π"),
            t("Sigma", r"\sigma", "σ"),
            t("Omega", r"\omega", "ω"),
        ],
    },
    TemplateCategory {
        name: "Calculus",
        quick: false,
        templates: &[
            t("Integral", r"\int_{a}^{b} f(x) \, dx", "∫"),
            t("Derivative", r"\frac{d}{dx}", "d/dx"),
            t("Partial", r"\frac{\partial}{\partial x}", "∂"),
            t("Limit", r"\lim_{x \to \infty}", "lim"),
            t("Sum", r"\sum_{i=1}^{n}", "Σ"),
            t("Product", r"\prod_{i=1}^{n}", "Π"),
        ],
    },
    TemplateCategory {
        name: "Linear Algebra",
        quick: false,
        templates: &[
            t("Matrix 2x2", r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}", "⊞"),
            t(
                "Matrix 3x3",
                r"\begin{pmatrix} a & b & c \\ d & e & f \\ g & h & i \end{pmatrix}",
                "⊞₃",
            ),
            t("Determinant", r"\begin{vmatrix} a & b \\ c & d \end{vmatrix}", "|·|"),
            t("Vector", r"\vec{v}", "v⃗"),
            t("Dot Product", r"\vec{a} \cdot \vec{b}", "·"),
            t("Cross Product", r"\vec{a} \times \vec{b}", "×"),
        ],
    },
    TemplateCategory {
        name: "Logic & Sets",
        quick: false,
        templates: &[
            t("For All", r"\forall", "∀"),
            t("Exists", r"\exists", "∃"),
            t("Element Of", r"\in", "∈"),
            t("Subset", r"\subseteq", "⊆"),
            t("Union", r"\cup", "∪"),
            t("Intersection", r"\cap", "∩"),
            t("Implies", r"\Rightarrow", "⇒"),
            t("Iff", r"\Leftrightarrow", "⇔"),
        ],
    },
    TemplateCategory {
        name: "Relations",
        quick: false,
        templates: &[
            t("Not Equal", r"\neq", "≠"),
            t("Approx", r"\approx", "≈"),
            t("Less/Equal", r"\leq", "≤"),
            t("Greater/Equal", r"\geq", "≥"),
            t("Much Less", r"\ll", "≪"),
            t("Much Greater", r"\gg", "≫"),
            t("Proportional", r"\propto", "∝"),
        ],
    },
];

/// Categories to offer, given the `showQuickTemplates` setting.
pub fn visible_categories(show_more: bool) -> impl Iterator<Item = &'static TemplateCategory> {
    CATEGORIES.iter().filter(move |category| category.quick || show_more)
}

/// Look up a category by name, ignoring ASCII case.
pub fn category(name: &str) -> Option<&'static TemplateCategory> {
    CATEGORIES
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(name))
}

/// Look up a template by label across all categories, ignoring ASCII case.
pub fn find(label: &str) -> Option<&'static Template> {
    CATEGORIES
        .iter()
        .flat_map(|category| category.templates)
        .find(|template| template.label.eq_ignore_ascii_case(label))
}

/// One line per template, under the category name.
pub fn describe(category: &TemplateCategory) -> String {
    let mut out = String::from(category.name);
    for template in category.templates {
        out.push_str(&format!(
            "\n  {} {:<14} {}",
            template.icon, template.label, template.latex
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_categories() {
        let quick: Vec<_> = visible_categories(false).map(|c| c.name).collect();
        assert_eq!(quick, ["Basic", "Greek"]);
        assert_eq!(visible_categories(true).count(), CATEGORIES.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("fraction").map(|t| t.latex), Some(r"\frac{a}{b}"));
        assert_eq!(find("Matrix 2x2").map(|t| t.icon), Some("⊞"));
        assert!(find("Hyperbola").is_none());
    }

    #[test]
    fn test_category_lookup() {
        let calculus = category("calculus").unwrap();
        assert!(!calculus.quick);
        assert_eq!(calculus.templates.len(), 6);
        assert!(category("Topology").is_none());
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = CATEGORIES
            .iter()
            .flat_map(|c| c.templates)
            .map(|t| t.label.to_ascii_lowercase())
            .collect();
        let total = labels.len();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), total);
    }
}
