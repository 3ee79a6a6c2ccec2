//! Registration, promotion, and resolution tests.

use rstest::{fixture, rstest};

use crate::command::{CommandKind, CommandNode, CommandTree, CommandTreeError, NodeId};

#[fixture]
fn tree() -> CommandTree {
    CommandTree::new()
}

fn node(name: &str) -> CommandNode {
    CommandNode::new(name, format!("{name} command"))
}

fn kind_of(tree: &CommandTree, id: NodeId) -> Option<CommandKind> {
    tree.node(id).map(CommandNode::kind)
}

#[rstest]
fn top_level_registration_is_a_command(mut tree: CommandTree) {
    let ping = tree
        .add_command(NodeId::ROOT, node("ping"))
        .expect("registration should succeed");

    assert_eq!(kind_of(&tree, ping), Some(CommandKind::Command));
    assert_eq!(tree.parent(ping), Some(NodeId::ROOT));
    assert_eq!(tree.get_command("ping"), Some(ping));
}

#[rstest]
#[case("PING")]
#[case("Ping")]
#[case("ping")]
fn duplicate_names_in_any_case_are_rejected(mut tree: CommandTree, #[case] duplicate: &str) {
    tree.add_command(NodeId::ROOT, node("ping"))
        .expect("first registration should succeed");
    let before = tree.len();

    let error = tree
        .add_command(NodeId::ROOT, node(duplicate))
        .expect_err("duplicate should be rejected");

    assert_eq!(
        error,
        CommandTreeError::AlreadyRegistered {
            name: duplicate.to_owned()
        }
    );
    assert_eq!(tree.len(), before);
    assert_eq!(tree.children(NodeId::ROOT).len(), 1);
}

#[rstest]
fn rejected_registration_does_not_promote_parent(mut tree: CommandTree) {
    let admin = tree
        .add_command(NodeId::ROOT, node("admin"))
        .expect("admin registers");
    let nested = node("ban").with_subcommand(node("x")).with_subcommand(node("X"));

    let error = tree.add_command(admin, nested).expect_err("nested duplicate");

    assert!(matches!(error, CommandTreeError::AlreadyRegistered { .. }));
    assert_eq!(kind_of(&tree, admin), Some(CommandKind::Command));
    assert!(tree.children(admin).is_empty());
}

#[rstest]
fn first_child_promotes_command_to_group(mut tree: CommandTree) {
    let admin = tree.add_command(NodeId::ROOT, node("admin")).expect("admin");
    let ban = tree.add_command(admin, node("ban")).expect("ban");

    assert_eq!(kind_of(&tree, admin), Some(CommandKind::SubcommandGroup));
    assert_eq!(kind_of(&tree, ban), Some(CommandKind::Subcommand));
    assert!(tree.is_group(admin));
    assert!(!tree.is_group(ban));
}

#[rstest]
fn grandchild_promotes_subcommand_to_group(mut tree: CommandTree) {
    let admin = tree.add_command(NodeId::ROOT, node("admin")).expect("admin");
    let roles = tree.add_command(admin, node("roles")).expect("roles");
    let grant = tree.add_command(roles, node("grant")).expect("grant");

    assert_eq!(kind_of(&tree, admin), Some(CommandKind::SubcommandGroup));
    assert_eq!(kind_of(&tree, roles), Some(CommandKind::SubcommandGroup));
    assert_eq!(kind_of(&tree, grant), Some(CommandKind::Subcommand));
    assert_eq!(tree.get_command("admin roles grant"), Some(grant));
}

#[rstest]
fn declared_subcommands_register_with_parent(mut tree: CommandTree) {
    let admin = tree
        .add_command(
            NodeId::ROOT,
            node("admin").with_subcommand(node("roles").with_subcommand(node("grant"))),
        )
        .expect("nested registration");

    let grant = tree.get_command("ADMIN Roles grant").expect("grant resolves");

    assert_eq!(tree.ancestry(grant).first(), Some(&NodeId::ROOT));
    assert_eq!(tree.ancestry(grant).get(1), Some(&admin));
    assert_eq!(tree.qualified_name(grant), "admin roles grant");
    assert_eq!(kind_of(&tree, grant), Some(CommandKind::Subcommand));
}

#[rstest]
fn resolution_stops_at_non_group_and_reports_leftovers(mut tree: CommandTree) {
    let ping = tree.add_command(NodeId::ROOT, node("ping")).expect("ping");

    let resolution = tree
        .resolve(["ping", "extra", "bits"])
        .expect("ping still resolves");

    assert_eq!(resolution.node, ping);
    assert!(resolution.is_malformed());
    assert_eq!(resolution.unresolved, vec!["extra".to_owned(), "bits".to_owned()]);
    assert_eq!(tree.get_command("ping extra"), Some(ping));
}

#[rstest]
fn unknown_segment_under_group_resolves_nothing(mut tree: CommandTree) {
    let admin = tree.add_command(NodeId::ROOT, node("admin")).expect("admin");
    tree.add_command(admin, node("ban")).expect("ban");

    assert_eq!(tree.get_command("admin kick"), None);
    assert_eq!(tree.get_command("missing"), None);
    assert_eq!(tree.get_command(""), None);
}

#[rstest]
fn group_path_without_leaf_resolves_to_group(mut tree: CommandTree) {
    let admin = tree.add_command(NodeId::ROOT, node("admin")).expect("admin");
    tree.add_command(admin, node("ban")).expect("ban");

    let resolution = tree.resolve(["admin"]).expect("group resolves");

    assert_eq!(resolution.node, admin);
    assert!(tree.is_group(resolution.node));
}

#[rstest]
fn remove_command_detaches_subtree(mut tree: CommandTree) {
    let admin = tree.add_command(NodeId::ROOT, node("admin")).expect("admin");
    let ban = tree.add_command(admin, node("ban")).expect("ban");
    tree.add_command(NodeId::ROOT, node("ping")).expect("ping");

    let removed = tree.remove_command(NodeId::ROOT, "ADMIN").expect("admin removed");

    assert_eq!(removed.name(), "admin");
    assert_eq!(tree.node(ban).map(CommandNode::name), None);
    assert_eq!(tree.len(), 1);
    assert!(tree.remove_command(NodeId::ROOT, "admin").is_none());
}

#[rstest]
fn remove_all_commands_clears_recursively(mut tree: CommandTree) {
    let admin = tree.add_command(NodeId::ROOT, node("admin")).expect("admin");
    tree.add_command(admin, node("ban")).expect("ban");
    tree.add_command(NodeId::ROOT, node("ping")).expect("ping");

    tree.remove_all_commands(NodeId::ROOT);

    assert!(tree.is_empty());
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[rstest]
fn all_commands_lists_children_by_name(mut tree: CommandTree) {
    tree.add_command(NodeId::ROOT, node("Zap")).expect("zap");
    tree.add_command(NodeId::ROOT, node("admin")).expect("admin");

    let names: Vec<&str> = tree
        .all_commands(NodeId::ROOT)
        .into_iter()
        .map(CommandNode::name)
        .collect();

    assert_eq!(names, vec!["admin", "Zap"]);
}

#[rstest]
fn names_with_whitespace_are_rejected(mut tree: CommandTree) {
    let error = tree
        .add_command(NodeId::ROOT, node("two words"))
        .expect_err("spaced name");
    assert_eq!(error, CommandTreeError::InvalidName("two words".to_owned()));
}

#[rstest]
#[should_panic(expected = "failed to register command")]
fn must_add_command_panics_on_duplicate(mut tree: CommandTree) {
    tree.must_add_command(NodeId::ROOT, node("ping"));
    tree.must_add_command(NodeId::ROOT, node("Ping"));
}
