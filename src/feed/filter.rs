use super::classify::classify;
use super::types::{Classification, Item};

/// Which classification view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    PriorityOnly,
    PromotionalOnly,
}

/// Caller-supplied filter configuration. Predicates compose by AND.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub search_text: String,
    pub class_filter: ClassFilter,
    /// Hide promotional items unless the promotional view is active.
    pub suppress_promotional: bool,
}

impl FilterConfig {
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty()
            || self.class_filter != ClassFilter::All
            || self.suppress_promotional
    }
}

/// Apply the filter predicates to the feed, returning indices into
/// `items` in their original order. Filtering never reorders.
pub fn filter_indices(items: &[Item], cfg: &FilterConfig) -> Vec<usize> {
    let query = cfg.search_text.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            let class = classify(item);
            match cfg.class_filter {
                ClassFilter::All => {
                    if cfg.suppress_promotional && class == Classification::Promotional {
                        return false;
                    }
                }
                ClassFilter::PriorityOnly => {
                    if class != Classification::Priority {
                        return false;
                    }
                }
                ClassFilter::PromotionalOnly => {
                    // Explicitly viewing promotions overrides suppression
                    if class != Classification::Promotional {
                        return false;
                    }
                }
            }
            query.is_empty() || matches_search(item, &query)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Case-insensitive substring match against subject, sender, preview.
fn matches_search(item: &Item, query: &str) -> bool {
    let subject = item.subject.as_deref().unwrap_or("").to_lowercase();
    let sender = item.sender_display().to_lowercase();
    let preview = item.preview.to_lowercase();
    subject.contains(query) || sender.contains(query) || preview.contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::Sender;

    fn item(id: &str, subject: &str, sender: &str, preview: &str) -> Item {
        Item {
            id: id.to_string(),
            subject: Some(subject.to_string()),
            sender: Some(Sender {
                name: Some(sender.to_string()),
                addr: format!("{}@example.com", id),
            }),
            preview: preview.to_string(),
            ..Item::default()
        }
    }

    fn promo(id: &str, subject: &str) -> Item {
        Item {
            labels: vec!["promotions".to_string()],
            ..item(id, subject, "Deals Bot", "")
        }
    }

    #[test]
    fn search_matches_subject_sender_and_preview() {
        // 50-item feed, exactly 3 mention "invoice" across the three fields
        let mut items: Vec<Item> = (0..47)
            .map(|i| item(&format!("m{i}"), "status update", "Alice", "all quiet"))
            .collect();
        items.insert(5, item("inv1", "Invoice #204 attached", "Alice", ""));
        items.insert(20, item("inv2", "question", "Invoice Dept", ""));
        items.insert(40, item("inv3", "question", "Bob", "see the invoice below"));

        let cfg = FilterConfig {
            search_text: "invoice".to_string(),
            ..FilterConfig::default()
        };
        let hits = filter_indices(&items, &cfg);
        assert_eq!(hits.len(), 3);
        // Original relative order preserved
        assert_eq!(
            hits.iter().map(|&i| items[i].id.as_str()).collect::<Vec<_>>(),
            vec!["inv1", "inv2", "inv3"]
        );
    }

    #[test]
    fn empty_query_matches_everything() {
        let items = vec![item("a", "x", "y", "z"), item("b", "x", "y", "z")];
        assert_eq!(filter_indices(&items, &FilterConfig::default()), vec![0, 1]);
    }

    #[test]
    fn suppression_hides_promotions_in_all_view() {
        let items = vec![item("a", "repair", "Bob", ""), promo("b", "spring sale")];
        let cfg = FilterConfig {
            suppress_promotional: true,
            ..FilterConfig::default()
        };
        assert_eq!(filter_indices(&items, &cfg), vec![0]);
    }

    #[test]
    fn promotional_view_overrides_suppression() {
        let items = vec![item("a", "repair", "Bob", ""), promo("b", "spring sale")];
        let cfg = FilterConfig {
            class_filter: ClassFilter::PromotionalOnly,
            suppress_promotional: true,
            ..FilterConfig::default()
        };
        assert_eq!(filter_indices(&items, &cfg), vec![1]);
    }

    #[test]
    fn predicates_compose_with_and() {
        let items = vec![
            item("a", "urgent: invoice overdue", "Bob", ""),
            item("b", "invoice received", "Bob", ""),
            item("c", "urgent: leak", "Bob", ""),
        ];
        let cfg = FilterConfig {
            search_text: "invoice".to_string(),
            class_filter: ClassFilter::PriorityOnly,
            ..FilterConfig::default()
        };
        // Only the item that is both a search hit and priority-classified
        assert_eq!(filter_indices(&items, &cfg), vec![0]);
    }
}
