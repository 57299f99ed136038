//! Sample data inserted into an empty database.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::project::CreateProject;
use crate::repositories::ProjectRepo;

/// `(name, client, start, end)` for each sample project.
const SAMPLE_PROJECTS: &[(&str, &str, (i32, u32, u32), (i32, u32, u32))] = &[
    ("Website Redesign", "Tech Corp", (2024, 1, 15), (2024, 3, 15)),
    ("Mobile App Development", "StartupXYZ", (2024, 2, 1), (2024, 6, 1)),
    ("E-commerce Platform", "Retail Store", (2024, 1, 1), (2024, 4, 30)),
    ("Sistema de Gestão", "Empresa ABC", (2024, 3, 1), (2024, 8, 31)),
    ("API Rest Completa", "Tech Solutions", (2024, 2, 15), (2024, 5, 15)),
];

fn sample_inputs() -> Vec<CreateProject> {
    SAMPLE_PROJECTS
        .iter()
        .filter_map(|&(name, client, (sy, sm, sd), (ey, em, ed))| {
            Some(CreateProject {
                name: name.to_string(),
                client: client.to_string(),
                start_date: NaiveDate::from_ymd_opt(sy, sm, sd)?,
                end_date: NaiveDate::from_ymd_opt(ey, em, ed)?,
                cover_image: None,
                is_favorite: None,
            })
        })
        .collect()
}

/// Insert the sample projects when the table is empty.
///
/// Returns the number of projects inserted (zero if data already existed).
pub async fn seed_sample_projects(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let existing = ProjectRepo::count(pool).await?;
    if existing > 0 {
        tracing::debug!(existing, "Projects present, skipping sample data");
        return Ok(0);
    }

    let inputs = sample_inputs();
    for input in &inputs {
        ProjectRepo::create(pool, input).await?;
    }
    tracing::info!(count = inputs.len(), "Sample projects created");
    Ok(inputs.len())
}
