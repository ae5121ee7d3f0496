mod common;

use common::write;
use scaffold::hooks::{find_hook, render_pre_gen_hook, Hook};
use scaffold::renderer::MiniJinjaRenderer;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_find_hook() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    assert_eq!(find_hook(root, Hook::PreGenProject), None);

    write(root, "hooks/pre_gen_project.py", "print('hi')");
    write(root, "hooks/post_gen_project.sh", "echo hi");

    assert_eq!(
        find_hook(root, Hook::PreGenProject),
        Some(root.join("hooks/pre_gen_project.py"))
    );
    assert_eq!(
        find_hook(root, Hook::PostGenProject),
        Some(root.join("hooks/post_gen_project.sh"))
    );
    assert_eq!(find_hook(root, Hook::PrePrompt), None);
}

#[test]
fn test_pre_gen_hook_rendered_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "hooks/pre_gen_project.go", "// {{ scaffold.name }}\n");

    let rendered = render_pre_gen_hook(
        root,
        &MiniJinjaRenderer::new(),
        &json!({"scaffold": {"name": "demo"}}),
        false,
    )
    .unwrap();

    let hook_path = root.join("hooks/pre_gen_project.go");
    assert_eq!(rendered, Some(hook_path.clone()));
    assert_eq!(fs::read_to_string(hook_path).unwrap(), "// demo\n");
}

#[cfg(unix)]
#[test]
fn test_read_only_pre_gen_hook_rendered_in_place() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "hooks/pre_gen_project.sh", "echo {{ scaffold.name }}\n");
    let hook_path = root.join("hooks/pre_gen_project.sh");
    fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o555)).unwrap();

    render_pre_gen_hook(root, &MiniJinjaRenderer::new(), &json!({"scaffold": {"name": "demo"}}), false)
        .unwrap();

    assert_eq!(fs::read_to_string(&hook_path).unwrap(), "echo demo\n");
    assert_eq!(fs::metadata(&hook_path).unwrap().permissions().mode() & 0o777, 0o555);
}

#[test]
fn test_pre_gen_hook_untouched_in_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "hooks/pre_gen_project.sh", "echo {{ scaffold.name }}");

    render_pre_gen_hook(root, &MiniJinjaRenderer::new(), &json!({"scaffold": {"name": "demo"}}), true)
        .unwrap();

    assert_eq!(
        fs::read_to_string(root.join("hooks/pre_gen_project.sh")).unwrap(),
        "echo {{ scaffold.name }}"
    );
}

#[test]
fn test_without_pre_gen_hook() {
    let temp_dir = TempDir::new().unwrap();
    let result =
        render_pre_gen_hook(temp_dir.path(), &MiniJinjaRenderer::new(), &json!({}), false).unwrap();
    assert_eq!(result, None);
}
