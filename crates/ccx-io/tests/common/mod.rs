//! FRD text builder for the integration tests.
#![allow(dead_code)]

/// Fortran `E12.5` field
pub fn e12(v: f64) -> String {
    let s = format!("{v:.5E}");
    let (mantissa, exp) = s.split_once('E').expect("exponent");
    let exp: i32 = exp.parse().expect("exponent value");
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{:>12}", format!("{mantissa}E{sign}{:02}", exp.abs()))
}

pub struct FrdBuilder {
    text: String,
}

impl FrdBuilder {
    pub fn new(job: &str) -> Self {
        Self {
            text: format!("    1C{job}\n    1UDATE  16.october.2026\n"),
        }
    }

    pub fn nodes(mut self, nodes: &[(i32, [f64; 3])]) -> Self {
        self.text
            .push_str(&format!("    2C{:>30}{:>38}\n", nodes.len(), 1));
        for (id, [x, y, z]) in nodes {
            self.text
                .push_str(&format!(" -1{id:>10}{}{}{}\n", e12(*x), e12(*y), e12(*z)));
        }
        self.text.push_str(" -3\n");
        self
    }

    /// `(id, FRD type code, nodes)`
    pub fn elements(mut self, elements: &[(i32, i32, Vec<i32>)]) -> Self {
        self.text
            .push_str(&format!("    3C{:>30}{:>38}\n", elements.len(), 1));
        for (id, code, nodes) in elements {
            self.text
                .push_str(&format!(" -1{id:>10}{code:>5}{:>5}{:>5}\n", 0, 1));
            for chunk in nodes.chunks(10) {
                let ids: String = chunk.iter().map(|n| format!("{n:>10}")).collect();
                self.text.push_str(&format!(" -2{ids}\n"));
            }
        }
        self.text.push_str(" -3\n");
        self
    }

    /// Result block; `location` is the FRD result type (1 nodal, 3 elemental),
    /// components are `(name, ictype)`.
    pub fn field(
        mut self,
        increment: i32,
        time: f64,
        name: &str,
        location: i32,
        components: &[(&str, i32)],
        rows: &[(i32, Vec<f64>)],
    ) -> Self {
        self.text.push_str(&format!(
            "  100C{:<6}{}{:>12}{:20}{:>2}{:>5}{:10}{:>2}\n",
            "L  101",
            e12(time),
            rows.len(),
            "",
            1,
            increment,
            "",
            1
        ));
        self.text.push_str(&format!(
            " -4  {name:<8}{:>5}{location:>5}\n",
            components.len()
        ));
        for (i, (component, ictype)) in components.iter().enumerate() {
            self.text.push_str(&format!(
                " -5  {component:<8}{:>5}{ictype:>5}{:>5}{:>5}\n",
                1,
                i + 1,
                0
            ));
        }
        for (id, values) in rows {
            for (line, chunk) in values.chunks(6).enumerate() {
                let fields: String = chunk.iter().map(|v| e12(*v)).collect();
                if line == 0 {
                    self.text.push_str(&format!(" -1{id:>10}{fields}\n"));
                } else {
                    self.text.push_str(&format!(" -2{:>10}{fields}\n", ""));
                }
            }
        }
        self.text.push_str(" -3\n");
        self
    }

    pub fn disp(self, increment: i32, time: f64, rows: &[(i32, Vec<f64>)]) -> Self {
        self.field(
            increment,
            time,
            "DISP",
            1,
            &[("D1", 2), ("D2", 2), ("D3", 2)],
            rows,
        )
    }

    pub fn stress(self, increment: i32, time: f64, rows: &[(i32, Vec<f64>)]) -> Self {
        let components: Vec<(&str, i32)> = ["SXX", "SYY", "SZZ", "SXY", "SYZ", "SZX"]
            .iter()
            .map(|c| (*c, 4))
            .collect();
        self.field(increment, time, "STRESS", 1, &components, rows)
    }

    /// Text without the closing `9999` record
    pub fn unterminated(self) -> String {
        self.text
    }

    pub fn build(mut self) -> String {
        self.text.push_str(" 9999\n");
        self.text
    }
}

/// Unit tetrahedron, nodes 1-4, element 1
pub fn tet(job: &str) -> FrdBuilder {
    FrdBuilder::new(job)
        .nodes(&[
            (1, [0.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [0.0, 1.0, 0.0]),
            (4, [0.0, 0.0, 1.0]),
        ])
        .elements(&[(1, 3, vec![1, 2, 3, 4])])
}

pub fn disp_rows(scale: f64) -> Vec<(i32, Vec<f64>)> {
    (1..=4)
        .map(|id| (id, vec![scale * id as f64, 0.0, -scale]))
        .collect()
}
