//! Style tokens resolved to markup before templates see them.

use shared::domain::{AccentToken, IconToken};

const SVG_OPEN: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">"#;

fn icon_paths(icon: IconToken) -> &'static str {
    match icon {
        IconToken::Shield => r#"<path d="M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z"/>"#,
        IconToken::Smartphone => {
            r#"<rect x="5" y="2" width="14" height="20" rx="2"/><path d="M12 18h.01"/>"#
        }
        IconToken::FileCheck => {
            r#"<path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"/><path d="M14 2v6h6"/><path d="m9 15 2 2 4-4"/>"#
        }
        IconToken::Server => {
            r#"<rect x="2" y="2" width="20" height="8" rx="2"/><rect x="2" y="14" width="20" height="8" rx="2"/><path d="M6 6h.01M6 18h.01"/>"#
        }
        IconToken::Lock => {
            r#"<rect x="3" y="11" width="18" height="11" rx="2"/><path d="M7 11V7a5 5 0 0 1 10 0v4"/>"#
        }
        IconToken::GraduationCap => {
            r#"<path d="M22 10 12 5 2 10l10 5 10-5z"/><path d="M6 12v5c3 3 9 3 12 0v-5"/>"#
        }
        IconToken::TrendingUp => r#"<path d="m22 7-8.5 8.5-5-5L2 17"/><path d="M16 7h6v6"/>"#,
        IconToken::Users => {
            r#"<path d="M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2"/><circle cx="9" cy="7" r="4"/><path d="M22 21v-2a4 4 0 0 0-3-3.87M16 3.13a4 4 0 0 1 0 7.75"/>"#
        }
        IconToken::Award => {
            r#"<circle cx="12" cy="8" r="6"/><path d="M15.48 12.89 17 22l-5-3-5 3 1.52-9.11"/>"#
        }
    }
}

/// Inline SVG for an icon token. Output is trusted markup.
pub fn icon_svg(icon: IconToken) -> String {
    format!("{SVG_OPEN}{}</svg>", icon_paths(icon))
}

pub fn accent_class(accent: AccentToken) -> &'static str {
    match accent {
        AccentToken::PurplePink => "accent-purple-pink",
        AccentToken::BlueCyan => "accent-blue-cyan",
        AccentToken::GreenEmerald => "accent-green-emerald",
        AccentToken::OrangeRed => "accent-orange-red",
        AccentToken::IndigoPurple => "accent-indigo-purple",
        AccentToken::TealGreen => "accent-teal-green",
    }
}

/// CSS background for the accent badge.
pub fn accent_gradient(accent: AccentToken) -> &'static str {
    match accent {
        AccentToken::PurplePink => "linear-gradient(135deg, #a855f7, #ec4899)",
        AccentToken::BlueCyan => "linear-gradient(135deg, #3b82f6, #06b6d4)",
        AccentToken::GreenEmerald => "linear-gradient(135deg, #22c55e, #10b981)",
        AccentToken::OrangeRed => "linear-gradient(135deg, #f97316, #ef4444)",
        AccentToken::IndigoPurple => "linear-gradient(135deg, #6366f1, #a855f7)",
        AccentToken::TealGreen => "linear-gradient(135deg, #14b8a6, #22c55e)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_renders_a_closed_svg() {
        for icon in [
            IconToken::Shield,
            IconToken::Smartphone,
            IconToken::FileCheck,
            IconToken::Server,
            IconToken::Lock,
            IconToken::GraduationCap,
            IconToken::TrendingUp,
            IconToken::Users,
            IconToken::Award,
        ] {
            let svg = icon_svg(icon);
            assert!(svg.starts_with("<svg"));
            assert!(svg.ends_with("</svg>"));
        }
    }

    #[test]
    fn accents_map_to_distinct_classes() {
        assert_eq!(accent_class(AccentToken::BlueCyan), "accent-blue-cyan");
        assert_ne!(
            accent_gradient(AccentToken::PurplePink),
            accent_gradient(AccentToken::TealGreen)
        );
    }
}
