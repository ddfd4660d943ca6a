//! Engine-level tests for the three block operations over realistic
//! Terraform-style documents.

use blockedit::editor::{get_block, list_block, rename_block, BlockEditor, EditError};
use blockedit::Address;

const FIXTURE: &str = "\
terraform {
  required_version = \">= 1.0\"
}

# first instance
resource \"aws_instance\" \"foo\" {
  ami           = \"ami-123456\"
  instance_type = \"t3.micro\"

  ebs_block_device {
    volume_size = 10
  }
}

provider \"aws\" {
  alias  = \"primary\"
  region = \"us-east-1\"
}

provider \"aws\" {
  alias  = \"replica\"
  region = \"us-west-2\"
}
";

#[test]
fn get_returns_the_full_block_text() {
    let output = get_block(FIXTURE, "resource.aws_instance.foo").unwrap();
    assert_eq!(
        output,
        "\
resource \"aws_instance\" \"foo\" {
  ami           = \"ami-123456\"
  instance_type = \"t3.micro\"

  ebs_block_device {
    volume_size = 10
  }
}
"
    );
}

#[test]
fn get_returns_nested_block_spans() {
    let output = get_block(FIXTURE, "resource.aws_instance.foo.ebs_block_device").unwrap();
    assert_eq!(output, "ebs_block_device {\n    volume_size = 10\n  }\n");
}

#[test]
fn get_concatenates_duplicate_matches_in_source_order() {
    let output = get_block(FIXTURE, "provider.aws").unwrap();
    assert_eq!(
        output,
        "\
provider \"aws\" {
  alias  = \"primary\"
  region = \"us-east-1\"
}
provider \"aws\" {
  alias  = \"replica\"
  region = \"us-west-2\"
}
"
    );
}

#[test]
fn get_without_matches_emits_nothing() {
    assert_eq!(get_block(FIXTURE, "module.vpc").unwrap(), "");
}

#[test]
fn list_enumerates_every_block_at_every_depth() {
    let output = list_block(FIXTURE).unwrap();
    assert_eq!(
        output,
        "\
terraform
resource.aws_instance.foo
resource.aws_instance.foo.ebs_block_device
provider.aws
provider.aws
"
    );
}

#[test]
fn list_lines_reparse_as_addresses() {
    let output = list_block(FIXTURE).unwrap();
    let editor = BlockEditor::parse(FIXTURE).unwrap();
    let listed = editor.list();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), listed.len());
    for (line, address) in lines.iter().zip(&listed) {
        assert_eq!(&Address::parse(line).unwrap(), address);
    }
}

#[test]
fn mv_rewrites_only_the_matched_header() {
    let output = rename_block(
        FIXTURE,
        "resource.aws_instance.foo",
        "resource.aws_instance.bar",
    )
    .unwrap();
    assert_eq!(
        output,
        FIXTURE.replace(
            "resource \"aws_instance\" \"foo\" {",
            "resource \"aws_instance\" \"bar\" {"
        )
    );
}

#[test]
fn mv_renames_every_duplicate_match() {
    let output = rename_block(FIXTURE, "provider.aws", "provider.aws_legacy").unwrap();
    assert_eq!(output.matches("provider \"aws_legacy\" {").count(), 2);
    assert!(!output.contains("provider \"aws\" {"));

    // Locality: the new address now matches exactly the old match set.
    let editor = BlockEditor::parse(&output).unwrap();
    let new_address = Address::parse("provider.aws_legacy").unwrap();
    assert_eq!(editor.get(&new_address).unwrap().len(), 2);
    let old_address = Address::parse("provider.aws").unwrap();
    assert!(editor.get(&old_address).unwrap().is_empty());
}

#[test]
fn mv_to_same_address_is_byte_identical() {
    let output = rename_block(
        FIXTURE,
        "resource.aws_instance.foo",
        "resource.aws_instance.foo",
    )
    .unwrap();
    assert_eq!(output, FIXTURE);
}

#[test]
fn mv_can_change_the_label_count() {
    let output = rename_block(FIXTURE, "terraform", "terraform.main").unwrap();
    assert_eq!(
        output,
        FIXTURE.replace("terraform {", "terraform \"main\" {")
    );

    let back = rename_block(&output, "terraform.main", "terraform").unwrap();
    assert_eq!(back, FIXTURE);
}

#[test]
fn mv_renames_a_nested_block_under_its_parent() {
    let output = rename_block(
        FIXTURE,
        "resource.aws_instance.foo.ebs_block_device",
        "resource.aws_instance.foo.root_block_device",
    )
    .unwrap();
    assert_eq!(
        output,
        FIXTURE.replace("  ebs_block_device {", "  root_block_device {")
    );
}

#[test]
fn mv_without_matches_is_no_match_found() {
    let err = rename_block(FIXTURE, "module.vpc", "module.network").unwrap_err();
    assert!(matches!(err, EditError::NoMatchFound { .. }));
}

#[test]
fn malformed_addresses_are_rejected_before_any_matching() {
    let err = get_block(FIXTURE, "resource..foo").unwrap_err();
    assert!(matches!(err, EditError::MalformedAddress { .. }));

    let err = rename_block(FIXTURE, "provider.\"aws", "provider.gcp").unwrap_err();
    assert!(matches!(err, EditError::MalformedAddress { .. }));
}

#[test]
fn invalid_documents_fail_to_parse() {
    let err = list_block("resource \"aws_instance\" {").unwrap_err();
    assert!(matches!(err, EditError::Parse { .. }));
}

#[test]
fn labels_with_embedded_delimiters_round_trip_through_list() {
    let input = "module \"a.b\" {\n  source = \"./a.b\"\n}\n";
    let listed = list_block(input).unwrap();
    assert_eq!(listed, "module.\"a.b\"\n");

    let line = listed.trim_end();
    let output = get_block(input, line).unwrap();
    assert_eq!(output, input);
}

#[test]
fn empty_document_has_no_blocks() {
    assert_eq!(list_block("").unwrap(), "");
    assert_eq!(get_block("", "anything").unwrap(), "");
}
