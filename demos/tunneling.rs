use std::{ fs, path::PathBuf };
use tunnelspace::{ calculate, TunnelingParameters };

// scatter a Gaussian packet off a barrier and dump the final state
//
// usage: tunneling [params.json]

fn main() {
    let params: TunnelingParameters
        = match std::env::args().nth(1) {
            Some(path) => {
                let text = fs::read_to_string(&path).unwrap();
                serde_json::from_str(&text).unwrap()
            },
            None => TunnelingParameters::default(),
        };
    let res = calculate(&params).unwrap();

    println!("method:            {}", params.method);
    println!("dt, steps:         {:.3e}, {}", res.stepping.dt, res.stepping.steps);
    println!("transmission:      {:.6}", res.transmission);
    println!("reflection:        {:.6}", res.reflection);
    println!("barrier occupancy: {:.6}", res.barrier_occupancy);
    println!("WKB transmission:  {:.6e}", res.wkb_transmission);
    println!("classically forbidden: {}", res.classical_forbidden);
    println!("total probability: {:.6}", res.conservation.total_probability);
    println!("<x>:               {:.6}", res.conservation.position_expectation);
    for warning in res.validation.warnings.iter() {
        println!("warning: {}", warning);
    }
    for error in res.validation.errors.iter() {
        println!("error: {}", error);
    }

    fs::write(
        PathBuf::from("tunneling.json"),
        serde_json::to_string(&res).unwrap(),
    ).unwrap();
}
