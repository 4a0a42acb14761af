use super::library::TaskLibrary;

/// Infers the task a request most likely refers to.
///
/// Each candidate scores one point per keyword found as a substring of the
/// lowercased, trimmed request. Only a strictly higher score replaces the
/// current best, so on ties the earlier entry of `keywords` wins.
///
/// # Arguments
/// * `request` - Free-text request
/// * `keywords` - Ordered `(task id, keywords)` table
///
/// # Returns
/// * `Option<String>` - The best task id, or `None` for an empty request or no hit
pub fn infer_task_key(request: &str, keywords: &[(&str, &[&str])]) -> Option<String> {
    let text = request.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let mut best: Option<&str> = None;
    let mut best_score = 0;
    for (task_id, words) in keywords {
        let score = words.iter().filter(|word| text.contains(**word)).count();
        if score > best_score {
            best = Some(*task_id);
            best_score = score;
        }
    }

    best.map(String::from)
}

/// Ranks library tasks by how many request tokens occur in their id, title
/// and description.
///
/// Returns every id in table order when the request is blank or nothing
/// matches; otherwise only the matching ids, best first, ties in table order.
pub fn suggest_tasks(request: &str, library: &TaskLibrary) -> Vec<String> {
    let text = request.trim().to_lowercase();
    if text.is_empty() {
        return library.ids();
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut ranked: Vec<(usize, &String)> = library
        .iter()
        .map(|(id, task)| {
            let bag = format!("{} {} {}", id, task.title, task.description).to_lowercase();
            let score = tokens.iter().filter(|token| bag.contains(**token)).count();
            (score, id)
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let matched: Vec<String> = ranked
        .into_iter()
        .filter(|(score, _)| *score > 0)
        .map(|(_, id)| id.clone())
        .collect();

    if matched.is_empty() {
        library.ids()
    } else {
        matched
    }
}
