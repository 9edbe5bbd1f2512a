use crate::assessment::Cooperative;

/// Cooperatives whose score lies within the optional inclusive bounds, highest score first.
pub fn cooperatives_by_score(
    cooperatives: &[Cooperative],
    min_score: Option<i64>,
    max_score: Option<i64>,
) -> Vec<Cooperative> {
    let mut ranked: Vec<Cooperative> = cooperatives
        .iter()
        .filter(|cooperative| min_score.map_or(true, |min| cooperative.score >= min))
        .filter(|cooperative| max_score.map_or(true, |max| cooperative.score <= max))
        .cloned()
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    ranked
}
