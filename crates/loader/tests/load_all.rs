use pretty_assertions::assert_eq;
use projgraph_loader::{root_namespace, LoaderConfig, LoaderError, ProjectLoader};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, content).expect("write file");
}

fn project_xml(namespace: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="15.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <RootNamespace>{namespace}</RootNamespace>
    <AssemblyName>{namespace}</AssemblyName>
    <TargetFrameworkVersion>v4.7.2</TargetFrameworkVersion>
  </PropertyGroup>
{body}
</Project>"#
    )
}

fn seed_tree(root: &Path) {
    write(
        root,
        "Acme.Core/src/Acme.Core.csproj",
        &project_xml(
            "Acme.Core",
            r#"  <ItemGroup>
    <Reference Include="Newtonsoft.Json, Version=12.0.0.0, Culture=neutral, PublicKeyToken=30ad4fe6b2a6aeed">
      <HintPath>..\packages\Newtonsoft.Json.12.0.3\lib\net45\Newtonsoft.Json.dll</HintPath>
      <Private>True</Private>
    </Reference>
    <Reference Include="System.Xml" />
  </ItemGroup>
  <ItemGroup>
    <Compile Include="Widget.cs" />
  </ItemGroup>"#,
        ),
    );
    write(
        root,
        "Acme.Core/src/packages.config",
        r#"<packages>
  <package id="Newtonsoft.Json" version="12.0.3" targetFramework="net472" />
</packages>"#,
    );

    write(
        root,
        "Acme.Web/src/Acme.Web.csproj",
        &project_xml(
            "Acme.Web",
            r#"  <ItemGroup>
    <ProjectReference Include="..\..\Acme.Core\src\Acme.Core.csproj">
      <Name>Acme.Core</Name>
    </ProjectReference>
  </ItemGroup>"#,
        ),
    );
    write(
        root,
        "Acme.Web/src/packages.lock.json",
        r#"{"version":1,"dependencies":{"net472":{"Serilog":{"type":"Direct","resolved":"2.10.0"}}}}"#,
    );
}

#[test]
fn loads_and_links_tree() {
    let temp = TempDir::new().expect("tempdir");
    seed_tree(temp.path());

    let loader = ProjectLoader::new(LoaderConfig::default()).expect("loader");
    let projects = loader.load_all(temp.path()).expect("load all");
    assert_eq!(projects.len(), 2);

    let core = &projects[0];
    assert_eq!(core.key, "Acme.Core");
    assert_eq!(core.filename, "Acme.Core.csproj");
    assert_eq!(core.framework_version, "4.7.2");
    assert_eq!(core.references.len(), 2);
    assert_eq!(core.references[0].package_name, "Newtonsoft.Json");
    assert_eq!(core.references[0].version, "12.0.3");
    assert_eq!(core.files.len(), 1);
    assert_eq!(core.packages.len(), 1);

    let web = &projects[1];
    assert_eq!(web.key, "Acme.Web");
    assert_eq!(web.project_refs.len(), 1);
    assert_eq!(web.project_refs[0].key, "Acme.Core");
    assert_eq!(web.packages.len(), 1);
    assert!(web.packages[0].locked);
    assert_eq!(web.packages[0].id, "Serilog");
}

#[test]
fn graph_answers_dependency_questions() {
    let temp = TempDir::new().expect("tempdir");
    seed_tree(temp.path());

    let loader = ProjectLoader::new(LoaderConfig::default()).expect("loader");
    let graph = loader.load_graph(temp.path()).expect("graph");

    let deps = graph.dependencies("Acme.Web").expect("deps");
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].root_namespace, "Acme.Core");

    assert_eq!(
        graph
            .referenced_version("Acme.Core", "Newtonsoft.Json")
            .expect("version"),
        Some("12.0.3".to_string())
    );
}

#[test]
fn dangling_sibling_reference_fails_whole_load() {
    let temp = TempDir::new().expect("tempdir");
    seed_tree(temp.path());
    write(
        temp.path(),
        "Acme.Tools/src/Acme.Tools.csproj",
        &project_xml(
            "Acme.Tools",
            r#"  <ItemGroup>
    <ProjectReference Include="..\..\Missing\Missing.Lib.csproj">
      <Name>Missing.Lib</Name>
    </ProjectReference>
  </ItemGroup>"#,
        ),
    );

    let loader = ProjectLoader::new(LoaderConfig::default()).expect("loader");
    let err = loader.load_all(temp.path()).expect_err("must fail");
    assert!(matches!(err, LoaderError::Graph(_)));
    assert!(err.to_string().contains("Missing.Lib"), "got: {err}");
}

#[test]
fn unreadable_project_is_an_io_error() {
    let loader = ProjectLoader::new(LoaderConfig::default()).expect("loader");
    let err = loader
        .load(Path::new("/definitely/not/here/App.csproj"))
        .expect_err("must fail");
    assert!(matches!(err, LoaderError::Io { .. }));
}

#[test]
fn one_unreadable_project_fails_whole_batch() {
    let temp = TempDir::new().expect("tempdir");
    seed_tree(temp.path());

    let core = temp.path().join("Acme.Core/src/Acme.Core.csproj");
    let vanished = temp.path().join("Acme.Gone/src/Acme.Gone.csproj");
    let web = temp.path().join("Acme.Web/src/Acme.Web.csproj");

    let loader = ProjectLoader::new(LoaderConfig::default()).expect("loader");
    assert_eq!(loader.load_files(&[&core, &web]).expect("load").len(), 2);

    let err = loader
        .load_files(&[&core, &vanished, &web])
        .expect_err("must fail");
    match err {
        LoaderError::Io { path, .. } => assert_eq!(path, vanished),
        other => panic!("expected io error, got {other}"),
    }
}

#[cfg(unix)]
#[test]
fn unreadable_project_fails_load_all() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().expect("tempdir");
    seed_tree(temp.path());
    let locked = temp.path().join("Acme.Web/src/Acme.Web.csproj");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    // Permission bits do not stop privileged users.
    if fs::read(&locked).is_ok() {
        return;
    }

    let loader = ProjectLoader::new(LoaderConfig::default()).expect("loader");
    let err = loader.load_all(temp.path()).expect_err("must fail");
    assert!(matches!(err, LoaderError::Io { ref path, .. } if *path == locked));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).expect("chmod");
}

#[test]
fn root_namespace_of_single_file() {
    let temp = TempDir::new().expect("tempdir");
    seed_tree(temp.path());

    let ns = root_namespace(&temp.path().join("Acme.Web/src/Acme.Web.csproj")).expect("read");
    assert_eq!(ns, "Acme.Web");
}

#[test]
fn invalid_config_is_rejected() {
    let config = LoaderConfig {
        key_depth: 0,
        ..LoaderConfig::default()
    };
    assert!(matches!(
        ProjectLoader::new(config),
        Err(LoaderError::InvalidConfig(_))
    ));
}
