//! Test fixtures for common test scenarios.
//!
//! Provides sample native project files and a builder that lays out a
//! complete app (manifest, Android and iOS projects, installed packages)
//! in a temporary directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// An app project with an `App` target, a test target and an empty
/// `Libraries` group.
pub const APP_PBXPROJ: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 46;
	objects = {

/* Begin PBXBuildFile section */
		13B07FBC1A68108700A75B9A /* AppDelegate.m in Sources */ = {isa = PBXBuildFile; fileRef = 13B07FB01A68108700A75B9A /* AppDelegate.m */; };
		00E356F31AD99517003FC87E /* AppTests.m in Sources */ = {isa = PBXBuildFile; fileRef = 00E356F21AD99517003FC87E /* AppTests.m */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		13B07FB01A68108700A75B9A /* AppDelegate.m */ = {isa = PBXFileReference; fileEncoding = 4; lastKnownFileType = sourcecode.c.objc; name = AppDelegate.m; path = App/AppDelegate.m; sourceTree = "<group>"; };
		13B07F961A680F5B00A75B9A /* App.app */ = {isa = PBXFileReference; explicitFileType = wrapper.application; includeInIndex = 0; path = App.app; sourceTree = BUILT_PRODUCTS_DIR; };
		00E356EE1AD99517003FC87E /* AppTests.xctest */ = {isa = PBXFileReference; explicitFileType = wrapper.cfbundle; includeInIndex = 0; path = AppTests.xctest; sourceTree = BUILT_PRODUCTS_DIR; };
		00E356F21AD99517003FC87E /* AppTests.m */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.c.objc; path = AppTests.m; sourceTree = "<group>"; };
/* End PBXFileReference section */

/* Begin PBXFrameworksBuildPhase section */
		13B07F8C1A680F5B00A75B9A /* Frameworks */ = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
		00E356EB1AD99517003FC87E /* Frameworks */ = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXFrameworksBuildPhase section */

/* Begin PBXGroup section */
		83CBB9F61A601CBA00E9B192 = {
			isa = PBXGroup;
			children = (
				13B07FAE1A68108700A75B9A /* App */,
				832341AE1AAA6A7D00B99B32 /* Libraries */,
				83CBBA001A601CBA00E9B192 /* Products */,
			);
			indentWidth = 2;
			sourceTree = "<group>";
			tabWidth = 2;
		};
		13B07FAE1A68108700A75B9A /* App */ = {
			isa = PBXGroup;
			children = (
				13B07FB01A68108700A75B9A /* AppDelegate.m */,
			);
			name = App;
			sourceTree = "<group>";
		};
		832341AE1AAA6A7D00B99B32 /* Libraries */ = {
			isa = PBXGroup;
			children = (
			);
			name = Libraries;
			sourceTree = "<group>";
		};
		83CBBA001A601CBA00E9B192 /* Products */ = {
			isa = PBXGroup;
			children = (
				13B07F961A680F5B00A75B9A /* App.app */,
				00E356EE1AD99517003FC87E /* AppTests.xctest */,
			);
			name = Products;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		13B07F861A680F5B00A75B9A /* App */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = 13B07F931A680F5B00A75B9A /* Build configuration list for PBXNativeTarget "App" */;
			buildPhases = (
				13B07F871A680F5B00A75B9A /* Sources */,
				13B07F8C1A680F5B00A75B9A /* Frameworks */,
			);
			buildRules = (
			);
			dependencies = (
			);
			name = App;
			productName = "Hello World";
			productReference = 13B07F961A680F5B00A75B9A /* App.app */;
			productType = "com.apple.product-type.application";
		};
		00E356ED1AD99517003FC87E /* AppTests */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = 00E357021AD99517003FC87E /* Build configuration list for PBXNativeTarget "AppTests" */;
			buildPhases = (
				00E356EA1AD99517003FC87E /* Sources */,
				00E356EB1AD99517003FC87E /* Frameworks */,
			);
			buildRules = (
			);
			dependencies = (
			);
			name = AppTests;
			productName = AppTests;
			productReference = 00E356EE1AD99517003FC87E /* AppTests.xctest */;
			productType = "com.apple.product-type.bundle.unit-test";
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		83CBB9F71A601CBA00E9B192 /* Project object */ = {
			isa = PBXProject;
			attributes = {
				LastUpgradeCheck = 0940;
				ORGANIZATIONNAME = Facebook;
			};
			buildConfigurationList = 83CBB9FA1A601CBA00E9B192 /* Build configuration list for PBXProject "App" */;
			compatibilityVersion = "Xcode 3.2";
			developmentRegion = English;
			hasScannedForEncodings = 0;
			knownRegions = (
				en,
				Base,
			);
			mainGroup = 83CBB9F61A601CBA00E9B192;
			productRefGroup = 83CBBA001A601CBA00E9B192 /* Products */;
			projectDirPath = "";
			projectRoot = "";
			targets = (
				13B07F861A680F5B00A75B9A /* App */,
				00E356ED1AD99517003FC87E /* AppTests */,
			);
		};
/* End PBXProject section */

/* Begin PBXSourcesBuildPhase section */
		13B07F871A680F5B00A75B9A /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				13B07FBC1A68108700A75B9A /* AppDelegate.m in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
		00E356EA1AD99517003FC87E /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				00E356F31AD99517003FC87E /* AppTests.m in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXSourcesBuildPhase section */

/* Begin XCBuildConfiguration section */
		13B07F941A680F5B00A75B9A /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ASSETCATALOG_COMPILER_APPICON_NAME = AppIcon;
				CURRENT_PROJECT_VERSION = 1;
				INFOPLIST_FILE = App/Info.plist;
				LD_RUNPATH_SEARCH_PATHS = "$(inherited) @executable_path/Frameworks";
				OTHER_LDFLAGS = (
					"$(inherited)",
					"-ObjC",
					"-lc++",
				);
				PRODUCT_NAME = App;
			};
			name = Debug;
		};
		13B07F951A680F5B00A75B9A /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ASSETCATALOG_COMPILER_APPICON_NAME = AppIcon;
				CURRENT_PROJECT_VERSION = 1;
				HEADER_SEARCH_PATHS = (
					"$(inherited)",
					"$(SRCROOT)/../node_modules/react-native/React/**",
				);
				INFOPLIST_FILE = App/Info.plist;
				PRODUCT_NAME = App;
			};
			name = Release;
		};
		00E356F61AD99517003FC87E /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				INFOPLIST_FILE = AppTests/Info.plist;
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Debug;
		};
		00E356F71AD99517003FC87E /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				INFOPLIST_FILE = AppTests/Info.plist;
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Release;
		};
		83CBBA201A601CBA00E9B192 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ALWAYS_SEARCH_USER_PATHS = NO;
				SDKROOT = iphoneos;
			};
			name = Debug;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		00E357021AD99517003FC87E /* Build configuration list for PBXNativeTarget "AppTests" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				00E356F61AD99517003FC87E /* Debug */,
				00E356F71AD99517003FC87E /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
		13B07F931A680F5B00A75B9A /* Build configuration list for PBXNativeTarget "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				13B07F941A680F5B00A75B9A /* Debug */,
				13B07F951A680F5B00A75B9A /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
		83CBB9FA1A601CBA00E9B192 /* Build configuration list for PBXProject "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				83CBBA201A601CBA00E9B192 /* Debug */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
/* End XCConfigurationList section */
	};
	rootObject = 83CBB9F71A601CBA00E9B192 /* Project object */;
}
"#;

/// A library project exporting one static library.
pub const LIBRARY_PBXPROJ: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 46;
	objects = {

/* Begin PBXFileReference section */
		134814201AA4EA6300B7C361 /* libRCTActionSheet.a */ = {isa = PBXFileReference; explicitFileType = archive.ar; includeInIndex = 0; path = libRCTActionSheet.a; sourceTree = BUILT_PRODUCTS_DIR; };
/* End PBXFileReference section */

/* Begin PBXGroup section */
		58B511D21A9E6C8500147676 = {
			isa = PBXGroup;
			children = (
				134814211AA4EA7D00B7C361 /* Products */,
			);
			sourceTree = "<group>";
		};
		134814211AA4EA7D00B7C361 /* Products */ = {
			isa = PBXGroup;
			children = (
				134814201AA4EA6300B7C361 /* libRCTActionSheet.a */,
			);
			name = Products;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		58B511DA1A9E6C8500147676 /* RCTActionSheet */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = 58B511EF1A9E6C8500147676 /* Build configuration list for PBXNativeTarget "RCTActionSheet" */;
			buildPhases = (
			);
			name = RCTActionSheet;
			productName = RCTActionSheet;
			productReference = 134814201AA4EA6300B7C361 /* libRCTActionSheet.a */;
			productType = "com.apple.product-type.library.static";
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		58B511D31A9E6C8500147676 /* Project object */ = {
			isa = PBXProject;
			mainGroup = 58B511D21A9E6C8500147676;
			targets = (
				58B511DA1A9E6C8500147676 /* RCTActionSheet */,
			);
		};
/* End PBXProject section */

/* Begin XCConfigurationList section */
		58B511EF1A9E6C8500147676 /* Build configuration list for PBXNativeTarget "RCTActionSheet" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
			);
		};
/* End XCConfigurationList section */
	};
	rootObject = 58B511D31A9E6C8500147676 /* Project object */;
}
"#;

/// Root `settings.gradle` of the sample app.
pub const SETTINGS_GRADLE: &str = "rootProject.name = 'App'\n\ninclude ':app'\n";

/// App module `build.gradle` of the sample app.
pub const BUILD_GRADLE: &str = r#"apply plugin: "com.android.application"

android {
    compileSdkVersion 28
}

dependencies {
    implementation fileTree(dir: "libs", include: ["*.jar"])
    implementation "com.facebook.react:react-native:+"
}
"#;

/// `MainApplication.java` of the sample app.
pub const MAIN_APPLICATION: &str = r#"package com.example.app;

import android.app.Application;

import com.facebook.react.ReactApplication;
import com.facebook.react.ReactNativeHost;
import com.facebook.react.ReactPackage;
import com.facebook.react.shell.MainReactPackage;

import java.util.Arrays;
import java.util.List;

public class MainApplication extends Application implements ReactApplication {
  @Override
  protected List<ReactPackage> getPackages() {
    return Arrays.<ReactPackage>asList(
        new MainReactPackage()
    );
  }
}
"#;

/// `AndroidManifest.xml` of the sample app.
pub const ANDROID_MANIFEST: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.app">
    <application android:name=".MainApplication" />
</manifest>
"#;

/// `strings.xml` of the sample app.
pub const STRINGS_XML: &str = r#"<resources>
    <string name="app_name">App</string>
</resources>
"#;

/// Fixture for an installed native package.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    /// Package name.
    pub name: String,
    /// Extra `package.json` fields (JSON object body without braces).
    pub extra_manifest: String,
    /// Whether the package ships an Android library.
    pub android: bool,
    /// Whether the package ships an iOS library project.
    pub ios: bool,
    /// Additional files (path relative to the package root -> content).
    pub files: BTreeMap<PathBuf, String>,
}

impl PackageFixture {
    /// A package with both platforms.
    pub fn new(name: impl Into<String>) -> Self {
        PackageFixture {
            name: name.into(),
            extra_manifest: String::new(),
            android: true,
            ios: true,
            files: BTreeMap::new(),
        }
    }

    /// A package with an Android library only.
    pub fn android_only(name: impl Into<String>) -> Self {
        PackageFixture {
            ios: false,
            ..Self::new(name)
        }
    }

    /// A package with an iOS library only.
    pub fn ios_only(name: impl Into<String>) -> Self {
        PackageFixture {
            android: false,
            ..Self::new(name)
        }
    }

    /// Add fields to the package's `package.json`.
    pub fn with_manifest_fields(mut self, fields: impl Into<String>) -> Self {
        self.extra_manifest = fields.into();
        self
    }

    /// Add a file to the package.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Class name of the generated Android package.
    pub fn class_name(&self) -> String {
        let mut class: String = self
            .name
            .rsplit('/')
            .next()
            .unwrap_or(&self.name)
            .split('-')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(c) => c.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect();
        class.push_str("Package");
        class
    }

    fn write_to(&self, node_modules: &Path) -> std::io::Result<()> {
        let root = node_modules.join(&self.name);
        std::fs::create_dir_all(&root)?;

        let extra = if self.extra_manifest.is_empty() {
            String::new()
        } else {
            format!(",\n  {}", self.extra_manifest)
        };
        std::fs::write(
            root.join("package.json"),
            format!("{{\n  \"name\": \"{}\",\n  \"version\": \"1.0.0\"{}\n}}\n", self.name, extra),
        )?;

        if self.android {
            let class = self.class_name();
            let java_dir = root.join("android/src/main/java/com/example/lib");
            std::fs::create_dir_all(&java_dir)?;
            std::fs::write(
                root.join("android/build.gradle"),
                "apply plugin: 'com.android.library'\n",
            )?;
            std::fs::write(
                java_dir.join(format!("{}.java", class)),
                format!(
                    "package com.example.lib;\n\nimport com.facebook.react.ReactPackage;\n\npublic class {} implements ReactPackage {{\n}}\n",
                    class
                ),
            )?;
        }

        if self.ios {
            let project = root.join("ios").join(format!("{}.xcodeproj", self.class_name()));
            std::fs::create_dir_all(&project)?;
            std::fs::write(project.join("project.pbxproj"), LIBRARY_PBXPROJ)?;
            std::fs::write(
                root.join("ios").join(format!("{}.h", self.class_name())),
                "#import <React/RCTBridgeModule.h>\n",
            )?;
        }

        for (path, content) in &self.files {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full, content)?;
        }
        Ok(())
    }
}

/// Fixture for a complete app.
#[derive(Debug, Clone)]
pub struct AppFixture {
    /// Whether to lay out `android/`.
    pub android: bool,
    /// Whether to lay out `ios/`.
    pub ios: bool,
    /// Installed packages.
    pub packages: Vec<PackageFixture>,
}

impl AppFixture {
    /// An app supporting both platforms.
    pub fn new() -> Self {
        AppFixture {
            android: true,
            ios: true,
            packages: Vec::new(),
        }
    }

    /// Install a package and declare it as a dependency.
    pub fn with_package(mut self, package: PackageFixture) -> Self {
        self.packages.push(package);
        self
    }

    /// Drop the iOS project.
    pub fn without_ios(mut self) -> Self {
        self.ios = false;
        self
    }

    /// Write the app to `root`.
    pub fn write_to(&self, root: &Path) -> std::io::Result<()> {
        let deps: Vec<String> = self
            .packages
            .iter()
            .map(|p| format!("    \"{}\": \"1.0.0\"", p.name))
            .collect();
        let manifest = format!(
            "{{\n  \"name\": \"App\",\n  \"dependencies\": {{\n    \"react-native\": \"0.59.0\"{}{}\n  }}\n}}\n",
            if deps.is_empty() { "" } else { ",\n" },
            deps.join(",\n")
        );
        std::fs::write(root.join("package.json"), manifest)?;

        if self.android {
            let android = root.join("android");
            let main = android.join("app/src/main");
            let java = main.join("java/com/example/app");
            let values = main.join("res/values");
            std::fs::create_dir_all(&java)?;
            std::fs::create_dir_all(&values)?;
            std::fs::write(android.join("settings.gradle"), SETTINGS_GRADLE)?;
            std::fs::write(android.join("app/build.gradle"), BUILD_GRADLE)?;
            std::fs::write(main.join("AndroidManifest.xml"), ANDROID_MANIFEST)?;
            std::fs::write(java.join("MainApplication.java"), MAIN_APPLICATION)?;
            std::fs::write(values.join("strings.xml"), STRINGS_XML)?;
        }

        if self.ios {
            let project = root.join("ios/App.xcodeproj");
            std::fs::create_dir_all(&project)?;
            std::fs::write(project.join("project.pbxproj"), APP_PBXPROJ)?;
        }

        let node_modules = root.join("node_modules");
        for package in &self.packages {
            package.write_to(&node_modules)?;
        }
        Ok(())
    }
}

impl Default for AppFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Read every regular file under `root` (excluding `node_modules`) into a map,
/// for before/after comparisons.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            let content = std::fs::read_to_string(e.path()).unwrap_or_default();
            (rel, content)
        })
        .collect()
}

/// Files whose content differs between two snapshots.
pub fn changed(
    before: &BTreeMap<PathBuf, String>,
    after: &BTreeMap<PathBuf, String>,
) -> Vec<PathBuf> {
    after
        .iter()
        .filter(|(path, content)| before.get(*path) != Some(content))
        .map(|(path, _)| path.clone())
        .collect()
}
