use super::types::{Classification, Item};

// Label flags set by the backend win over keyword heuristics.
const PRIORITY_LABELS: &[&str] = &["priority", "urgent", "important"];
const PROMO_LABELS: &[&str] = &["promotions", "marketing", "newsletter"];

// Keyword signals checked against the backend's keyword list and the subject.
const PRIORITY_KEYWORDS: &[&str] = &["urgent", "asap", "overdue", "emergency", "escalation"];
const PROMO_KEYWORDS: &[&str] = &["unsubscribe", "sale", "discount", "limited time", "% off"];

/// Map an item to its classification tag.
///
/// Pure and total: checks priority signals, then promotional signals,
/// in that fixed order, and falls through to `Normal` when nothing
/// matches. Absence of signals is the default case, not an error.
pub fn classify(item: &Item) -> Classification {
    if has_label(item, PRIORITY_LABELS) || has_keyword(item, PRIORITY_KEYWORDS) {
        return Classification::Priority;
    }
    if has_label(item, PROMO_LABELS) || has_keyword(item, PROMO_KEYWORDS) {
        return Classification::Promotional;
    }
    Classification::Normal
}

fn has_label(item: &Item, wanted: &[&str]) -> bool {
    item.labels
        .iter()
        .any(|l| wanted.iter().any(|w| l.eq_ignore_ascii_case(w)))
}

fn has_keyword(item: &Item, wanted: &[&str]) -> bool {
    let subject = item.subject.as_deref().unwrap_or("").to_lowercase();
    wanted.iter().any(|w| {
        subject.contains(w)
            || item
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(w))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(subject: &str, keywords: &[&str], labels: &[&str]) -> Item {
        Item {
            id: "m1".to_string(),
            subject: Some(subject.to_string()),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
            ..Item::default()
        }
    }

    #[test]
    fn label_flags_classify() {
        assert_eq!(
            classify(&item("rent due", &[], &["Priority"])),
            Classification::Priority
        );
        assert_eq!(
            classify(&item("spring deals", &[], &["promotions"])),
            Classification::Promotional
        );
    }

    #[test]
    fn keyword_signals_classify() {
        assert_eq!(
            classify(&item("URGENT: pipe burst in unit 4B", &[], &[])),
            Classification::Priority
        );
        assert_eq!(
            classify(&item("weekly digest", &["unsubscribe"], &[])),
            Classification::Promotional
        );
    }

    #[test]
    fn priority_wins_over_promotional() {
        // Both signal families present: the fixed check order decides.
        let it = item("urgent sale", &[], &["promotions"]);
        assert_eq!(classify(&it), Classification::Priority);
    }

    #[test]
    fn no_signals_defaults_to_normal() {
        assert_eq!(classify(&item("lease renewal", &[], &[])), Classification::Normal);
        assert_eq!(classify(&Item::default()), Classification::Normal);
    }

    #[test]
    fn classification_is_deterministic() {
        let it = item("Overdue invoice for October", &["billing"], &[]);
        let first = classify(&it);
        for _ in 0..100 {
            assert_eq!(classify(&it), first);
        }
    }
}
