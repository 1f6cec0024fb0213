//! Dashboard summary screen

use cf_core::ServiceResult;

use super::display_date;
use crate::prompt;
use crate::App;

pub async fn show(app: &App) {
    println!("\nDASHBOARD");

    match app.dashboard.summary().await {
        ServiceResult::Success { data, .. } => {
            println!("Total Projects: {}", data.total_projects);
            println!("Active Projects: {}", data.active_projects);
            println!("Total Teams: {}", data.total_teams);
            println!("Total Users: {}", data.total_users);
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }

    match app.dashboard.ending_soon(7).await {
        ServiceResult::Success { data, .. } if !data.is_empty() => {
            println!("\nProjects ending within 7 days:");
            for project in &data {
                println!(
                    "  - {} ({}) ends {}",
                    project.project_name,
                    project.project_code,
                    display_date(project.end_date)
                );
            }
        }
        ServiceResult::Success { .. } => println!("\nNo projects ending within 7 days."),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }

    match app.dashboard.latest_activities(5).await {
        ServiceResult::Success { data, .. } if !data.is_empty() => {
            println!("\nLatest activities:");
            for activity in &data {
                println!(
                    "  [{}] {} / {} - {}",
                    activity.activity_date,
                    activity.project_code,
                    activity.team_code,
                    activity.tasks
                );
            }
        }
        ServiceResult::Success { .. } => println!("\nNo activities recorded yet."),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }

    prompt::pause();
}
