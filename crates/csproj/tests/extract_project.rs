use pretty_assertions::assert_eq;
use projgraph_csproj::{
    extract_references, merge_package_versions, package_name_from_hint, rank, Package,
    ProjectAssembler, ProjectSource, Reference,
};
use std::path::Path;

const LEGACY_PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="14.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <Import Project="$(MSBuildExtensionsPath)\$(MSBuildToolsVersion)\Microsoft.Common.props" />
  <PropertyGroup>
    <Configuration Condition=" '$(Configuration)' == '' ">Debug</Configuration>
    <ProjectGuid>{1F2E3D4C-5B6A-7980-1A2B-3C4D5E6F7A8B}</ProjectGuid>
    <OutputType>Library</OutputType>
    <rootnamespace>Contoso.Orders</rootnamespace>
    <AssemblyName>Contoso.Orders</AssemblyName>
    <TargetFrameworkVersion>v4.5.2</TargetFrameworkVersion>
  </PropertyGroup>
  <ItemGroup>
    <Reference Include="Newtonsoft.Json, Version=12.0.0.0, Culture=neutral, PublicKeyToken=30ad4fe6b2a6aeed, processorArchitecture=MSIL">
      <HintPath>..\packages\Newtonsoft.Json.12.0.3\lib\net45\Newtonsoft.Json.dll</HintPath>
    </Reference>
    <Reference Include="Castle.Core">
      <HintPath>..\..\packages\Castle.Core.4.4.0\lib\net45\Castle.Core.dll</HintPath>
      <Private>False</Private>
    </Reference>
    <Reference Include="System" />
    <Reference Include="System.Xml" />
  </ItemGroup>
  <ItemGroup>
    <Compile Include="OrderService.cs" />
    <None Include="packages.config" />
  </ItemGroup>
  <ItemGroup>
    <ProjectReference Include="..\..\Contoso.Common\src\Contoso.Common.csproj">
      <Project>{0A1B2C3D-4E5F-6071-8293-A4B5C6D7E8F9}</Project>
      <Name>Contoso.Common</Name>
    </ProjectReference>
  </ItemGroup>
  <UnknownElement Foo="bar"><Nested /></UnknownElement>
  <Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />
</Project>"#;

const PACKAGES_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="Newtonsoft.Json" version="12.0.3" targetFramework="net452" />
  <package id="Castle.Core" version="4.4.0" targetFramework="net452" />
</packages>"#;

#[test]
fn legacy_project_round_trip() {
    let path = Path::new("repos/Contoso.Orders/src/Contoso.Orders.csproj");
    let source = ProjectSource::new(path, LEGACY_PROJECT).packages_config(Some(PACKAGES_CONFIG));
    let project = ProjectAssembler::default().assemble(&source);

    assert_eq!(project.key, "Contoso.Orders");
    assert_eq!(project.root_namespace, "Contoso.Orders");
    assert_eq!(project.framework_version, "4.5.2");

    let refs: Vec<(&str, &str, bool)> = project
        .references
        .iter()
        .map(|r| (r.name.as_str(), r.version.as_str(), r.is_package))
        .collect();
    assert_eq!(
        refs,
        vec![
            ("Newtonsoft.Json", "12.0.3", true),
            ("Castle.Core", "4.4.0", true),
            ("System", "", false),
            ("System.Xml", "", false),
        ]
    );

    let castle = &project.references[1];
    assert!(castle.has_private);
    assert!(!castle.private);

    assert_eq!(project.project_refs.len(), 1);
    assert_eq!(project.project_refs[0].name, "Contoso.Common");
    assert_eq!(project.files.len(), 2);
    assert_eq!(project.packages.len(), 2);
}

#[test]
fn bare_reference_properties() {
    let refs = extract_references(r#"<ItemGroup><Reference Include="System.Xml" /></ItemGroup>"#);
    assert_eq!(refs.len(), 1);
    assert!(!refs[0].has_private);
    assert_eq!(refs[0].hint, "");
    assert!(!refs[0].is_package);
}

#[test]
fn package_name_from_cache_folder() {
    assert_eq!(
        package_name_from_hint(r"..\packages\Newtonsoft.Json.12.0.3\lib\net45\Newtonsoft.Json.dll"),
        Some("Newtonsoft.Json".to_string())
    );
}

#[test]
fn rank_ordering_contract() {
    assert!(rank("2.1.0") > rank("1.9.9"));
    assert_eq!(rank("1.2.3.4"), rank("1.2.3"));
}

#[test]
fn merge_contract() {
    let hinted = |version: &str| Reference {
        name: "Castle.Core".to_string(),
        full_ref: "Castle.Core".to_string(),
        hint: r"..\packages\Castle.Core.3.1.4\lib\net45\Castle.Core.dll".to_string(),
        package_name: "Castle.Core".to_string(),
        is_package: true,
        version: version.to_string(),
        ..Default::default()
    };
    let packages = vec![Package {
        id: "Castle.Core".to_string(),
        version: "3.1.4".to_string(),
        version_val: rank("3.1.4"),
        ..Default::default()
    }];

    let mut refs = vec![hinted(""), hinted("2.5.0")];
    merge_package_versions(&mut refs, &packages);

    assert_eq!(refs[0].version, "3.1.4");
    assert_eq!(refs[1].version, "2.5.0");
}
