//! Scripted `aws` CLI for end-to-end runs.
//!
//! The script keeps stack sets and instances as marker files in a state
//! directory, so consecutive runs observe what earlier runs created. Every
//! invocation is appended to `calls.log`.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const SCRIPT: &str = r#"#!/bin/sh
state="$FAKE_AWS_STATE"
echo "$*" >> "$state/calls.log"

service="$1"
verb="$2"
shift 2

name=""; output=""; bucket=""; account=""; region=""
accounts=""; regions=""; positional=""; flag=""
for arg in "$@"; do
  case "$arg" in
    --*) flag="$arg"; continue ;;
  esac
  case "$flag" in
    --stack-set-name) name="$arg" ;;
    --output-template-file) output="$arg" ;;
    --s3-bucket) bucket="$arg" ;;
    --stack-instance-account) account="$arg" ;;
    --stack-instance-region) region="$arg" ;;
    --accounts) accounts="$accounts $arg" ;;
    --regions) regions="$regions $arg" ;;
    "") positional="$positional $arg" ;;
  esac
done

case "$service $verb" in
  "sts assume-role")
    if [ -n "$FAKE_AWS_DENY" ]; then
      echo "An error occurred (AccessDenied) when calling the AssumeRole operation: User is not authorized to perform: sts:AssumeRole" >&2
      exit 254
    fi
    printf '{"Credentials":{"AccessKeyId":"ASIAFAKEKEY","SecretAccessKey":"fake-secret","SessionToken":"fake-token","Expiration":"2030-01-01T00:00:00Z"}}\n'
    ;;
  "cloudformation package")
    printf 'Resources:\n  ResizeFunction:\n    Type: AWS::Serverless::Function\n    Properties:\n      CodeUri: s3://%s/cloudformation/5d41402abc4b2a76\n' "$bucket" > "$output"
    ;;
  "s3 cp")
    set -- $positional
    cp "$1" "$state/uploaded.yml"
    echo "$AWS_SESSION_TOKEN" > "$state/upload-token"
    printf 'upload: %s to %s\n' "$1" "$2"
    ;;
  "cloudformation describe-stack-set")
    if [ -f "$state/unit-$name" ]; then
      printf '{"StackSet":{"StackSetName":"%s","Status":"ACTIVE"}}\n' "$name"
    else
      echo "An error occurred (StackSetNotFoundException) when calling the DescribeStackSet operation: StackSet $name not found" >&2
      exit 254
    fi
    ;;
  "cloudformation create-stack-set")
    touch "$state/unit-$name"
    printf '{"StackSetId":"%s:0001"}\n' "$name"
    ;;
  "cloudformation update-stack-set")
    printf '{"OperationId":"op-update-set"}\n'
    ;;
  "cloudformation describe-stack-instance")
    if [ -f "$state/instance-$account-$region" ]; then
      printf '{"StackInstance":{"Account":"%s","Region":"%s","Status":"CURRENT"}}\n' "$account" "$region"
    else
      echo "An error occurred (StackInstanceNotFoundException) when calling the DescribeStackInstance operation: Stack instance not found" >&2
      exit 254
    fi
    ;;
  "cloudformation create-stack-instances")
    for a in $accounts; do
      for r in $regions; do
        touch "$state/instance-$a-$r"
      done
    done
    printf '{"OperationId":"op-create-instances"}\n'
    ;;
  "cloudformation update-stack-instances")
    printf '{"OperationId":"op-update-instances"}\n'
    ;;
  "cloudformation describe-stack-set-operation")
    printf '{"StackSetOperation":{"OperationId":"op","Status":"SUCCEEDED"}}\n'
    ;;
  "cloudformation list-stack-set-operation-results")
    printf '{"Summaries":[]}\n'
    ;;
  *)
    echo "unexpected call: $service $verb" >&2
    exit 2
    ;;
esac
"#;

/// A fake `aws` executable plus the state it accumulates
pub struct FakeAws {
    dir: TempDir,
}

impl FakeAws {
    pub fn install() -> Self {
        let dir = tempfile::tempdir().expect("create fake aws dir");
        let script = dir.path().join("aws");
        std::fs::write(&script, SCRIPT).expect("write fake aws");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("make fake aws executable");
        std::fs::create_dir_all(dir.path().join("state")).expect("create state dir");
        Self { dir }
    }

    pub fn program(&self) -> PathBuf {
        self.dir.path().join("aws")
    }

    pub fn state(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    /// Environment that points stackfleet at this fake
    pub fn vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("STACKFLEET_AWS_CLI", self.program().display().to_string()),
            ("FAKE_AWS_STATE", self.state().display().to_string()),
        ]
    }

    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.state().join("calls.log"))
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn uploaded_template(&self) -> Option<String> {
        std::fs::read_to_string(self.state().join("uploaded.yml")).ok()
    }

    pub fn upload_token(&self) -> Option<String> {
        std::fs::read_to_string(self.state().join("upload-token"))
            .ok()
            .map(|s| s.trim().to_string())
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
