// JUnit Stream - Streaming test report decoder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Well-formed reports in the shapes real test runners produce.

/// Report in the style of `go-junit-report`, with a wrapper and suite files.
///
/// Four cases: success, failed (message contained in body), skipped,
/// and a case overriding the suite's file.
pub fn go_test_report() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites tests="4" failures="1">
	<testsuite tests="3" failures="1" time="0.310" name="github.com/acme/api/auth" file="auth/auth_test.go">
		<properties>
			<property name="go.version" value="go1.21.5"></property>
		</properties>
		<testcase classname="auth" name="TestLogin" time="0.120"></testcase>
		<testcase classname="auth" name="TestLogout" time="0.180">
			<failure message="Failed" type="">auth_test.go:42: Failed&#xA;    expected status 200, got 500</failure>
		</testcase>
		<testcase classname="auth" name="TestRefresh" time="0.000">
			<skipped message="auth_test.go:61: needs redis"></skipped>
		</testcase>
	</testsuite>
	<testsuite tests="1" failures="0" time="0.005" name="github.com/acme/api/store" file="store/store_test.go">
		<testcase name="TestPut" time="0.005" file="store/put_test.go"></testcase>
	</testsuite>
</testsuites>
"#
}

/// Report in the style of Maven Surefire: a single suite, output captured.
///
/// Three cases: error with disjoint message and trace, system-out only,
/// and a case with both system-out and system-err (err comes last).
pub fn surefire_report() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" name="com.acme.OrderServiceTest" time="1.204" tests="3" errors="1" skipped="0" failures="0">
  <properties>
    <property name="java.version" value="17.0.9"/>
    <property name="os.name" value="Linux"/>
  </properties>
  <testcase name="placesOrder" classname="com.acme.OrderServiceTest" time="0.804">
    <error message="Connection refused" type="java.net.ConnectException">java.net.ConnectException: Connection refused
	at com.acme.OrderService.place(OrderService.java:88)</error>
  </testcase>
  <testcase name="cancelsOrder" classname="com.acme.OrderServiceTest" time="0.2">
    <system-out><![CDATA[cancelling order 17]]></system-out>
  </testcase>
  <testcase name="listsOrders" classname="com.acme.OrderServiceTest" time="0.2">
    <system-out>listing</system-out>
    <system-err>warning: slow query</system-err>
  </testcase>
</testsuite>
"#
}

/// Report in the style of pytest: cases without a file attribute.
pub fn pytest_report() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?><testsuites><testsuite name="pytest" errors="0" failures="1" skipped="1" tests="3" time="0.051" timestamp="2024-03-01T10:00:00" hostname="ci"><testcase classname="tests.test_math" name="test_add" time="0.001" /><testcase classname="tests.test_math" name="test_div" time="0.002"><failure message="ZeroDivisionError: division by zero">def test_div():
&gt;       1 / 0
E       ZeroDivisionError: division by zero</failure></testcase><testcase classname="tests.test_math" name="test_slow" time="0.000"><skipped type="pytest.skip" message="too slow">tests/test_math.py:12: too slow</skipped></testcase></testsuite></testsuites>"#
}

/// Suite without the `testsuites` wrapper and without class names.
pub fn bare_suite() -> &'static str {
    r#"<testsuite name="smoke" file="smoke.sh">
  <testcase name="boots" time="3.5"/>
  <testcase name="serves" time="not-a-number"/>
</testsuite>"#
}

/// Element and attribute names in unusual case.
pub fn mixed_case_names() -> &'static str {
    r#"<TestSuites><TestSuite Name="Upper" FILE="upper.c"><TestCase NAME="shouts" ClassName="Loud" Time="1"><Failure Message="too loud"/></TestCase></TestSuite></TestSuites>"#
}

/// Entities and CDATA inside attributes and bodies.
pub fn escaped_content() -> &'static str {
    r#"<testsuite name="escapes"><testcase name="compares &lt;a&gt; &amp; &quot;b&quot;"><failure message="1 &lt; 2">assert 1 &lt; 2<![CDATA[ <- raw & unescaped ]]></failure></testcase></testsuite>"#
}

/// Suite-level output and properties around the cases.
pub fn suite_noise() -> &'static str {
    r#"<testsuites>
  <testsuite name="noisy">
    <system-out>suite setup log
      <!-- comment inside ignored output --></system-out>
    <testcase name="one"/>
    <properties><property name="seed" value="42"/></properties>
    <testcase name="two"/>
    <system-err></system-err>
  </testsuite>
</testsuites>"#
}

/// Body of one suite for repetition inside a `testsuites` wrapper.
///
/// Holds seven cases: two failed, one skipped, one system-out and three
/// successes.
pub fn repeatable_suite() -> &'static str {
    r#"
  <testsuite name="stress" file="stress_test.go">
    <properties><property name="run" value="stress"/></properties>
    <testcase name="TestA" time="0.001"/>
    <testcase name="TestB" time="0.002"><failure message="b failed">b failed: at stress_test.go:20</failure></testcase>
    <testcase name="TestC" time="0.003"><skipped/></testcase>
    <testcase name="TestD" time="0.004"><system-out>chatty</system-out></testcase>
    <testcase name="TestE" time="0.005"><error message="panic">runtime error: index out of range</error></testcase>
    <testcase name="TestF" time="0.006"/>
    <testcase name="TestG" time="0.007"></testcase>
  </testsuite>"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count_testcases;

    #[test]
    fn test_case_counts() {
        assert_eq!(count_testcases(go_test_report()), 4);
        assert_eq!(count_testcases(surefire_report()), 3);
        assert_eq!(count_testcases(pytest_report()), 3);
        assert_eq!(count_testcases(bare_suite()), 2);
        assert_eq!(count_testcases(mixed_case_names()), 1);
        assert_eq!(count_testcases(escaped_content()), 1);
        assert_eq!(count_testcases(suite_noise()), 2);
        assert_eq!(count_testcases(repeatable_suite()), 7);
    }
}
