//! Project management screen

use cf_core::{PageRequest, ServiceResult};
use cf_services::{CreateProject, UpdateProject};

use super::{display_date, display_opt};
use crate::prompt;
use crate::App;

pub async fn menu(app: &App) {
    loop {
        println!();
        println!("PROJECT MANAGEMENT");
        println!("1. Create New Project");
        println!("2. View All Projects");
        println!("3. View Project Details");
        println!("4. Update Project");
        println!("5. Delete Project");
        println!("6. Back to Main Menu");
        print!("Enter your choice (1-6): ");

        match prompt::menu_choice(1, 6) {
            1 => create(app).await,
            2 => list(app).await,
            3 => details(app).await,
            4 => update(app).await,
            5 => delete(app).await,
            _ => return,
        }
        prompt::pause();
    }
}

async fn create(app: &App) {
    println!("\nCREATE NEW PROJECT");

    let request = CreateProject {
        project_code: prompt::required("Project Code (required): "),
        project_name: prompt::required("Project Name (required): "),
        repo_url: prompt::optional("Repository URL: "),
        start_date: prompt::date("Start Date (yyyy-mm-dd): "),
        end_date: prompt::date("End Date (yyyy-mm-dd): "),
        project_description: prompt::optional("Description: "),
        status: prompt::optional("Status [Active]: "),
        teams: Vec::new(),
    };

    println!("\nCreating project...");
    match app.projects.create(request).await {
        ServiceResult::Success { data, .. } => {
            println!("Successfully created project!");
            println!("Project ID: {}", data.project.project_id);
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn list(app: &App) {
    println!("\nLIST ALL PROJECTS");
    let page = PageRequest::new(1, 50);

    match app.projects.list(&page, None, None, None, false).await {
        ServiceResult::Success { data, .. } if !data.items.is_empty() => {
            println!("\nProjects ({} total):", data.total_count);
            for project in &data.items {
                println!(
                    "ID: {}, Code: {}, Name: {}, Status: {}",
                    project.project_id, project.project_code, project.project_name, project.status
                );
            }
        }
        ServiceResult::Success { .. } => println!("No projects found."),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn details(app: &App) {
    println!("\nVIEW PROJECT DETAILS");
    let project_id = prompt::required("Enter Project ID: ");

    match app.projects.get(&project_id).await {
        ServiceResult::Success { data, .. } => {
            let project = &data.project;
            println!("\nProject Details:");
            println!("ID: {}", project.project_id);
            println!("Code: {}", project.project_code);
            println!("Name: {}", project.project_name);
            println!("Status: {}", project.status);
            println!("Repository URL: {}", display_opt(&project.repo_url));
            println!("Start Date: {}", display_date(project.start_date));
            println!("End Date: {}", display_date(project.end_date));
            println!("Description: {}", display_opt(&project.project_description));
            if data.teams.is_empty() {
                println!("Teams: none");
            } else {
                println!("Teams:");
                for link in &data.teams {
                    let rating = link
                        .project_team_rating
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("  - {} (rating: {})", link.team_code, rating);
                }
            }
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn update(app: &App) {
    println!("\nUPDATE PROJECT");
    let project_id = prompt::required("Enter Project ID: ");

    let request = UpdateProject {
        project_code: prompt::required("Project Code (required): "),
        project_name: prompt::required("Project Name (required): "),
        repo_url: prompt::optional("Repository URL: "),
        start_date: prompt::date("Start Date (yyyy-mm-dd): "),
        end_date: prompt::date("End Date (yyyy-mm-dd): "),
        project_description: prompt::optional("Description: "),
        status: prompt::optional("Status (blank keeps current): "),
        teams: Vec::new(),
    };

    println!("\nUpdating project...");
    match app.projects.update(&project_id, request).await {
        ServiceResult::Success { .. } => println!("Successfully updated project!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn delete(app: &App) {
    println!("\nDELETE PROJECT");
    let project_id = prompt::required("Enter Project ID: ");

    println!("\nDeleting project...");
    match app.projects.delete(&project_id).await {
        ServiceResult::Success { .. } => println!("Successfully deleted project!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}
