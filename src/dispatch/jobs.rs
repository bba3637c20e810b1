const JOB_CATEGORIES: &[(&str, &[&str])] = &[
    ("cs", &["Software Engineer", "Data Scientist", "Machine Learning Engineer"]),
    ("it", &["IT Support Specialist", "Network Administrator", "System Analyst"]),
    ("sales", &["Sales Representative", "Account Manager", "Business Development Executive"]),
];

/// Titles for a category key. Unknown keys give an empty slice.
pub fn lookup_jobs(category: &str) -> &'static [&'static str] {
    let key = category.trim().to_lowercase();
    JOB_CATEGORIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, titles)| *titles)
        .unwrap_or(&[])
}

/// Spoken listing, e.g. `CS roles: Software Engineer, Data Scientist, ...`.
pub fn describe_jobs(category: &str) -> String {
    let label = category.trim().to_uppercase();
    let titles = lookup_jobs(category);

    if titles.is_empty() {
        format!("There are no {} roles.", label)
    } else {
        format!("{} roles: {}", label, titles.join(", "))
    }
}
