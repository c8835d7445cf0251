use std::env;

// proj-compat-sys publishes the cfgs it set as a comma separated list; set the
// same ones here so the safe layer knows which entry points are stand-ins.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfgs = env::var("DEP_PROJ_CFGS").map_err(|err| format!("DEP_PROJ_CFGS: {err}"))?;
    for cfg in cfgs.split(',').filter(|cfg| !cfg.is_empty()) {
        println!("cargo:rustc-cfg={cfg}");
    }
    Ok(())
}
