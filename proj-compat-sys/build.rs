use flate2::read::GzDecoder;
use std::env;
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Archive;

#[allow(dead_code)]
mod version_gates;

use version_gates::VERSION_GATES;

const MINIMUM_PROJ_VERSION: &str = "6.2.0";
const SOURCE_ENV: &str = "PROJ_COMPAT_SYS_SOURCE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ProjVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl ProjVersion {
    /// Read the `PROJ_VERSION_*` macros from `proj.h`.
    fn from_header(header: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(header)
            .map_err(|err| format!("unable to read {}: {err}", header.display()))?;
        let mut major = None;
        let mut minor = None;
        let mut patch = None;
        for line in contents.lines() {
            let mut tokens = line.split_whitespace();
            if tokens.next() != Some("#define") {
                continue;
            }
            let (Some(name), Some(value)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            let slot = match name {
                "PROJ_VERSION_MAJOR" => &mut major,
                "PROJ_VERSION_MINOR" => &mut minor,
                "PROJ_VERSION_PATCH" => &mut patch,
                _ => continue,
            };
            *slot = Some(value.parse::<u32>()?);
        }
        match (major, minor, patch) {
            (Some(major), Some(minor), Some(patch)) => Ok(ProjVersion {
                major,
                minor,
                patch,
            }),
            _ => Err(format!("no PROJ_VERSION_* definitions in {}", header.display()).into()),
        }
    }

    /// Tell cargo which stand-ins to compile, and publish the version and the
    /// cfgs to dependants as `DEP_PROJ_VERSION_*` and `DEP_PROJ_CFGS`.
    fn emit(&self) {
        let mut cfgs = Vec::new();
        for gate in VERSION_GATES {
            if gate.is_gated(self.major, self.minor) {
                eprintln!(
                    "PROJ {self} predates {}.{}: compiling a stand-in for {} (cfg {})",
                    gate.major, gate.minor, gate.function, gate.cfg
                );
                println!("cargo:rustc-cfg={}", gate.cfg);
                cfgs.push(gate.cfg);
            }
        }
        println!("cargo:version_major={}", self.major);
        println!("cargo:version_minor={}", self.minor);
        println!("cargo:version_patch={}", self.patch);
        println!("cargo:cfgs={}", cfgs.join(","));
    }
}

impl fmt::Display for ProjVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=wrapper.h");
    println!("cargo:rerun-if-changed=version_gates.rs");
    println!("cargo:rerun-if-env-changed={SOURCE_ENV}");

    let include_path = if cfg!(feature = "bundled_proj") {
        eprintln!("feature flags specified source build");
        build_from_source()?
    } else {
        pkg_config::Config::new()
            .atleast_version(MINIMUM_PROJ_VERSION)
            .probe("proj")
            .map(|pk| {
                eprintln!("found acceptable libproj already installed at: {:?}", pk.link_paths[0]);
                if let Ok(val) = &env::var("_PROJ_COMPAT_SYS_TEST_EXPECT_BUILD_FROM_SRC") {
                    if val != "0" {
                        panic!("for testing purposes: existing package was found, but should not have been");
                    }
                }

                // Tell cargo to tell rustc to link the system proj
                // shared library.
                println!("cargo:rustc-link-search=native={:?}", pk.link_paths[0]);
                println!("cargo:rustc-link-lib=proj");

                pk.include_paths[0].clone()
            })
            .or_else(|err| {
                eprintln!("pkg-config unable to find existing libproj installation: {err}");
                build_from_source()
            })?
    };

    let version = ProjVersion::from_header(&include_path.join("proj.h"))?;
    eprintln!("compiling against PROJ {version}");
    version.emit();

    let bindings = bindgen::Builder::default()
        .clang_arg(format!("-I{}", include_path.to_string_lossy()))
        .trust_clang_mangling(false)
        .size_t_is_usize(true)
        .blocklist_type("max_align_t")
        .header("wrapper.h")
        .generate()?;

    let out_path = PathBuf::from(env::var("OUT_DIR")?);
    bindings.write_to_file(out_path.join("bindings.rs"))?;

    Ok(())
}

// Unpacks the tarball named by PROJ_COMPAT_SYS_SOURCE and returns the
// directory holding PROJ's top-level CMakeLists.txt.
fn unpack_source(out_path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let tarball = env::var(SOURCE_ENV).map_err(|_| {
        format!("building libproj from source requires {SOURCE_ENV} to name a PROJ source tarball")
    })?;
    let unpack_dir = out_path.join("PROJSRC");
    let mut archive = Archive::new(GzDecoder::new(File::open(&tarball)?));
    archive.unpack(&unpack_dir)?;

    for entry in fs::read_dir(&unpack_dir)? {
        let path = entry?.path();
        if path.join("CMakeLists.txt").is_file() {
            return Ok(path);
        }
    }
    Err(format!("{tarball} does not contain a PROJ source tree").into())
}

// returns the path of "include" for the built proj
fn build_from_source() -> Result<PathBuf, Box<dyn std::error::Error>> {
    eprintln!("building libproj from source");
    if let Ok(val) = &env::var("_PROJ_COMPAT_SYS_TEST_EXPECT_BUILD_FROM_SRC") {
        if val == "0" {
            panic!(
                "for testing purposes: package was building from source but should not have been"
            );
        }
    }

    // NOTE: The PROJ build expects Sqlite3 to be present on the system.
    let out_path = PathBuf::from(env::var("OUT_DIR")?);
    let source_dir = unpack_source(&out_path)?;
    let mut config = cmake::Config::new(source_dir);
    config.define("BUILD_SHARED_LIBS", "OFF");
    config.define("BUILD_TESTING", "OFF");
    config.define("BUILD_APPS", "OFF");
    config.define("BUILD_CCT", "OFF");
    config.define("BUILD_CS2CS", "OFF");
    config.define("BUILD_GEOD", "OFF");
    config.define("BUILD_GIE", "OFF");
    config.define("BUILD_PROJ", "OFF");
    config.define("BUILD_PROJINFO", "OFF");
    config.define("BUILD_PROJSYNC", "OFF");
    config.define("ENABLE_CURL", "OFF");

    if cfg!(feature = "tiff") {
        eprintln!("enabling tiff support");
        config.define("ENABLE_TIFF", "ON");
    } else {
        eprintln!("disabling tiff support");
        config.define("ENABLE_TIFF", "OFF");
    }

    let proj = config.build();

    //proj likes to create proj_d when configured as debug and on MSVC, so link to that one if it exists
    if proj.join("lib").join("proj_d.lib").exists() {
        println!("cargo:rustc-link-lib=static=proj_d");
    } else {
        println!("cargo:rustc-link-lib=static=proj");
    }
    println!(
        "cargo:rustc-link-search=native={}",
        proj.join("lib").display()
    );
    println!(
        "cargo:rustc-link-search={}",
        &out_path.join("lib64").display()
    );
    println!(
        "cargo:rustc-link-search={}",
        &out_path.join("build/lib").display()
    );

    // The PROJ library needs SQLite and the C++ standard library.
    println!("cargo:rustc-link-lib=dylib=sqlite3");

    if cfg!(feature = "tiff") {
        match pkg_config::Config::new()
            .atleast_version("4.0")
            .probe("libtiff-4")
        {
            Ok(pk) => {
                eprintln!(
                    "found acceptable libtiff installed at: {:?}",
                    pk.link_paths[0]
                );
                println!("cargo:rustc-link-search=native={:?}", pk.link_paths[0]);
            }
            Err(err) => {
                // pkg-config might not even be installed; libtiff may still be
                // in a default search path.
                eprintln!("Failed to find libtiff with pkg-config: {err}");
            }
        }
        println!("cargo:rustc-link-lib=dylib=tiff");
    }

    if cfg!(target_os = "linux") {
        println!("cargo:rustc-link-lib=dylib=stdc++");
    } else if cfg!(target_os = "macos") {
        println!("cargo:rustc-link-lib=dylib=c++");
    } else {
        println!("cargo:warning=proj-compat-sys: Not configuring an explicit C++ standard library on this target.");
    }

    Ok(proj.join("include"))
}
