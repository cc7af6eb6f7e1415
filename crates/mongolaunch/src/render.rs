//! Human and machine renderings of a launch plan

use serde::Serialize;

use mongolaunch_common::Secrets;

use crate::launcher::LaunchPlan;

/// Output format for `plan`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlanFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct PlanView<'a> {
    runtime: &'a str,
    storage_path: String,
    args: Vec<String>,
}

/// Render the plan as a single command line or as JSON
pub fn render(plan: &LaunchPlan, format: PlanFormat, secrets: Secrets) -> serde_json::Result<String> {
    match format {
        PlanFormat::Text => Ok(command_line(plan, secrets)),
        PlanFormat::Json => {
            let view = PlanView {
                runtime: &plan.runtime,
                storage_path: plan.storage_path.display().to_string(),
                args: plan.invocation.render_args(secrets),
            };
            serde_json::to_string_pretty(&view)
        }
    }
}

/// `program arg...`, quoted so it can be pasted into a POSIX shell
pub fn command_line(plan: &LaunchPlan, secrets: Secrets) -> String {
    std::iter::once(plan.runtime.clone())
        .chain(plan.invocation.render_args(secrets))
        .map(|arg| shell_quote(&arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-quote `arg` when it contains anything a shell would interpret
pub fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongolaunch_common::Config;
    use std::path::PathBuf;

    fn plan(storage: &str) -> LaunchPlan {
        let config = Config::default();
        let storage_path = PathBuf::from(storage);
        LaunchPlan {
            runtime: config.runtime.program.clone(),
            invocation: config.invocation(&storage_path).unwrap(),
            storage_path,
        }
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("mongo:latest"), "mongo:latest");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
        assert_eq!(shell_quote("MONGO_INITDB_ROOT_PASSWORD=****"), "'MONGO_INITDB_ROOT_PASSWORD=****'");
    }

    #[test]
    fn test_command_line() {
        let line = command_line(&plan("/home/u/project/.tmp/mongo"), Secrets::Revealed);
        assert_eq!(
            line,
            "docker run --rm --name sample-mongodb -p 27017:27017 \
             -e MONGO_INITDB_ROOT_USERNAME=admin -e MONGO_INITDB_ROOT_PASSWORD=admin-password \
             -v /home/u/project/.tmp/mongo:/data/db mongo:latest"
        );
    }

    #[test]
    fn test_command_line_quotes_spaced_paths() {
        let line = command_line(&plan("/home/u/my project/.tmp/mongo"), Secrets::Masked);
        assert!(line.contains("-v '/home/u/my project/.tmp/mongo:/data/db'"));
        assert!(!line.contains("admin-password"));
    }

    #[test]
    fn test_json_rendering() {
        let json = render(&plan("/srv/.tmp/mongo"), PlanFormat::Json, Secrets::Masked).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["runtime"], "docker");
        assert_eq!(value["storage_path"], "/srv/.tmp/mongo");
        assert_eq!(value["args"][0], "run");
        assert_eq!(value["args"].as_array().unwrap().len(), 13);
        assert!(!json.contains("admin-password"));
    }
}
