//! Console input helpers
//!
//! Blocking prompts shared by every screen. Required prompts re-ask until
//! non-empty; date prompts accept a blank line as "no value" and re-ask on
//! anything that does not parse as `yyyy-mm-dd`.

use std::io::{self, Write};

use chrono::NaiveDate;

fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

/// Free-text input; empty becomes `None`.
pub fn optional(prompt: &str) -> Option<String> {
    let input = read_line(prompt);
    if input.is_empty() {
        None
    } else {
        Some(input)
    }
}

/// Re-asks until the input is non-empty.
pub fn required(prompt: &str) -> String {
    loop {
        let input = read_line(prompt);
        if !input.is_empty() {
            return input;
        }
        println!("This field is required!");
    }
}

/// Optional `yyyy-mm-dd` date; blank means none.
pub fn date(prompt: &str) -> Option<NaiveDate> {
    loop {
        let input = read_line(prompt);
        if input.is_empty() {
            return None;
        }
        match input.parse::<NaiveDate>() {
            Ok(parsed) => return Some(parsed),
            Err(_) => println!("Invalid date format. Please try again."),
        }
    }
}

/// Comma-separated codes; blanks are dropped.
pub fn code_list(prompt: &str) -> Vec<String> {
    read_line(prompt)
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Numbered selection; re-asks until a number in `min..=max`.
pub fn menu_choice(min: u32, max: u32) -> u32 {
    loop {
        let input = read_line("");
        if let Ok(choice) = input.parse::<u32>() {
            if choice >= min && choice <= max {
                return choice;
            }
        }
        print!("Invalid input. Please enter a number between {min} and {max}: ");
        let _ = io::stdout().flush();
    }
}

pub fn confirm(prompt: &str) -> bool {
    read_line(prompt).eq_ignore_ascii_case("y")
}

pub fn pause() {
    read_line("\nPress Enter to continue...");
}

pub fn show_error(message: &str) {
    println!("Error: {message}");
}
