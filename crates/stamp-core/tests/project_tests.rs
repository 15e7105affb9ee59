//! Tests for document checks, project root discovery and generation from disk.

use std::fs;
use std::path::Path;

use stamp_core::{
    RewriteError, RewriteOptions, ensure_csharp_document, find_project_root, generate,
};
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

#[test]
fn test_only_cs_documents_are_accepted() {
    assert!(ensure_csharp_document(Path::new("src/Mappers.cs")).is_ok());
    assert!(ensure_csharp_document(Path::new("src/MAPPERS.CS")).is_ok());
    for path in ["Mappers.vb", "Mappers.cshtml", "Mappers", "cs"] {
        let error = ensure_csharp_document(Path::new(path)).unwrap_err();
        assert!(matches!(error, RewriteError::DocumentKind(_)), "{path}");
    }
}

#[test]
fn test_solution_directory_is_preferred() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "App.sln", "");
    write_file(dir.path(), "src/App/App.csproj", "<Project />");
    write_file(dir.path(), "src/App/Mappers.cs", "class M { }");

    let root = find_project_root(&dir.path().join("src/App/Mappers.cs")).unwrap();
    assert_eq!(root, fs::canonicalize(dir.path()).unwrap());
}

#[test]
fn test_project_file_directory_without_solution() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "App/App.csproj", "<Project />");
    write_file(dir.path(), "App/Mapping/Mappers.cs", "class M { }");

    let root = find_project_root(&dir.path().join("App/Mapping/Mappers.cs")).unwrap();
    assert_eq!(root, fs::canonicalize(dir.path().join("App")).unwrap());
}

#[test]
fn test_missing_project_context() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "loose/Mappers.cs", "class M { }");
    // A directory named like a project file is not a project file.
    fs::create_dir_all(dir.path().join("loose/Fake.csproj")).unwrap();

    match find_project_root(&dir.path().join("loose/Mappers.cs")) {
        // An ancestor of the temp directory may hold a solution on some machines.
        Ok(root) => assert!(!root.starts_with(fs::canonicalize(dir.path()).unwrap())),
        Err(error) => {
            assert!(matches!(error, RewriteError::ProjectContextMissing(_)));
            assert!(error.is_precondition());
        }
    }
}

#[test]
fn test_generate_against_project_on_disk() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "App.csproj", "<Project />");
    write_file(
        dir.path(),
        "Models/Person.cs",
        "namespace App.Models;\n\npublic class Person\n{\n    public int Id { get; set; }\n    public string Name { get; init; }\n    public int Extra { get; set; }\n}\n",
    );
    write_file(
        dir.path(),
        "Dtos/PersonDto.cs",
        "namespace App.Dtos\n{\n    public record PersonDto(int Id, string Name);\n}\n",
    );
    // Build output is never part of the project.
    write_file(
        dir.path(),
        "obj/Debug/PersonDto.g.cs",
        "namespace App.Dtos { public partial record PersonDto { public int Extra { get; set; } } }",
    );
    let document = dir.path().join("Mapping/Mappers.cs");
    let draft = "using ToDto = (App.Models.Person, App.Dtos.PersonDto);\n\nnamespace App.Mapping\n{\n    public partial class Mappers\n    {\n    }\n}\n";
    write_file(dir.path(), "Mapping/Mappers.cs", "namespace Old { }");

    let output = generate(&document, draft, dir.path(), RewriteOptions::default()).unwrap();
    assert_eq!(
        output.text,
        r"using App.Dtos;
using App.Models;

namespace App.Mapping
{
    public static partial class Mappers
    {
        public static PersonDto ToDto(this Person source) => new PersonDto { Id = source.Id, Name = source.Name };
    }
}
"
    );
    assert_eq!(output.generated_count(), 1);
}

#[test]
fn test_generate_missing_root_is_a_store_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere");
    let error = generate(
        &dir.path().join("Mappers.cs"),
        "class M { }",
        &missing,
        RewriteOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(error, RewriteError::Store(_)));
    assert!(error.to_string().contains("is not a directory"));
}
